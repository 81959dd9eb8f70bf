mod category;
mod enriched;
mod gallery;
mod suggestion;

pub use category::Category;
pub use enriched::{
    Book, Movie, Recommendations, Song, SongImage, UNKNOWN_ARTIST, UNKNOWN_AUTHOR, UNKNOWN_TITLE,
};
pub use gallery::{Gallery, GalleryCard, GalleryColumn};
pub use suggestion::{RecommendationSet, Suggestion};
