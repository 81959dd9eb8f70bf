use crate::models::{
    Book, Category, Gallery, GalleryCard, GalleryColumn, Movie, Recommendations, Song,
    UNKNOWN_TITLE,
};

const SEARCH_URL: &str = "https://www.google.com/search?q=";
const TMDB_POSTER_URL: &str = "https://image.tmdb.org/t/p/w500";
const PORTRAIT_PLACEHOLDER: &str = "https://via.placeholder.com/300x450";
const SQUARE_PLACEHOLDER: &str = "https://via.placeholder.com/300x300";
/// Position of the extra-large variant in Last.fm's image list
const SONG_IMAGE_INDEX: usize = 3;

/// Percent-encodes a search term the way browsers' `encodeURIComponent` does
///
/// `urlencoding` leaves only `-_.~` unescaped; `encodeURIComponent` also keeps
/// `!'()*` as-is.
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Web search link for a search term
pub fn search_url(term: &str) -> String {
    format!("{}{}", SEARCH_URL, encode_uri_component(term))
}

fn movie_card(movie: &Movie) -> GalleryCard {
    let subtitle = movie
        .release_date
        .as_deref()
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .unwrap_or("N/A");

    let image_url = match movie.poster_path.as_deref() {
        Some(path) if !path.is_empty() => format!("{}{}", TMDB_POSTER_URL, path),
        _ => PORTRAIT_PLACEHOLDER.to_string(),
    };

    GalleryCard {
        title: movie.title.clone(),
        subtitle: subtitle.to_string(),
        image_url,
        search_url: search_url(&format!("{} {}", movie.title, Category::Movies.noun())),
    }
}

fn book_card(book: &Book) -> GalleryCard {
    GalleryCard {
        title: book.title.clone(),
        subtitle: book.authors.join(", "),
        image_url: book
            .cover_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| PORTRAIT_PLACEHOLDER.to_string()),
        search_url: search_url(&format!("{} {}", book.title, Category::Books.noun())),
    }
}

fn song_card(song: &Song) -> GalleryCard {
    let title = if song.title.is_empty() {
        UNKNOWN_TITLE
    } else {
        song.title.as_str()
    };

    let image_url = song
        .image
        .as_ref()
        .and_then(|images| images.get(SONG_IMAGE_INDEX))
        .map(|image| image.url.as_str())
        .filter(|url| !url.is_empty())
        .unwrap_or(SQUARE_PLACEHOLDER);

    GalleryCard {
        title: title.to_string(),
        subtitle: song.artist.clone(),
        image_url: image_url.to_string(),
        search_url: search_url(&format!(
            "{} {} {}",
            title,
            song.artist,
            Category::Songs.noun()
        )),
    }
}

fn column<T>(category: Category, items: &[T], card: fn(&T) -> GalleryCard) -> GalleryColumn {
    GalleryColumn {
        heading: category.heading().to_string(),
        items: items.iter().map(card).collect(),
    }
}

/// Lays recommendations out as the movies, books and songs columns
pub fn build_gallery(recommendations: &Recommendations) -> Gallery {
    Gallery {
        mood: recommendations.mood.clone(),
        columns: vec![
            column(Category::Movies, &recommendations.movies, movie_card),
            column(Category::Books, &recommendations.books, book_card),
            column(Category::Songs, &recommendations.songs, song_card),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongImage;
    use chrono::Utc;

    fn movie(title: &str, release_date: Option<&str>, poster_path: Option<&str>) -> Movie {
        Movie {
            title: title.to_string(),
            poster_path: poster_path.map(str::to_string),
            release_date: release_date.map(str::to_string),
            overview: None,
            tmdb_id: None,
            details: Default::default(),
        }
    }

    #[test]
    fn test_encode_uri_component_matches_browser() {
        assert_eq!(
            encode_uri_component("Schindler's List (1993)! *"),
            "Schindler's%20List%20(1993)!%20*"
        );
        assert_eq!(encode_uri_component("AC/DC & co?"), "AC%2FDC%20%26%20co%3F");
        assert_eq!(encode_uri_component("Amélie"), "Am%C3%A9lie");
    }

    #[test]
    fn test_movie_card() {
        let card = movie_card(&movie(
            "Lost in Translation",
            Some("2003-08-31"),
            Some("/poster.jpg"),
        ));

        assert_eq!(card.subtitle, "2003");
        assert_eq!(card.image_url, "https://image.tmdb.org/t/p/w500/poster.jpg");
        assert_eq!(
            card.search_url,
            "https://www.google.com/search?q=Lost%20in%20Translation%20movie"
        );
    }

    #[test]
    fn test_movie_card_without_metadata() {
        let card = movie_card(&movie("Her", None, None));

        assert_eq!(card.subtitle, "N/A");
        assert_eq!(card.image_url, PORTRAIT_PLACEHOLDER);
    }

    #[test]
    fn test_book_card_joins_authors() {
        let book = Book {
            title: "Good Omens".to_string(),
            authors: vec!["Terry Pratchett".to_string(), "Neil Gaiman".to_string()],
            cover_url: None,
            first_publish_year: None,
        };

        let card = book_card(&book);

        assert_eq!(card.subtitle, "Terry Pratchett, Neil Gaiman");
        assert_eq!(card.image_url, PORTRAIT_PLACEHOLDER);
        assert_eq!(
            card.search_url,
            "https://www.google.com/search?q=Good%20Omens%20book"
        );
    }

    #[test]
    fn test_song_card_uses_fourth_image() {
        let sizes = ["small", "medium", "large", "extralarge"];
        let song = Song {
            title: "Hurt".to_string(),
            artist: "Johnny Cash".to_string(),
            image: Some(
                sizes
                    .iter()
                    .map(|size| SongImage {
                        url: format!("https://img/{size}.png"),
                        size: size.to_string(),
                    })
                    .collect(),
            ),
            details: Default::default(),
        };

        let card = song_card(&song);

        assert_eq!(card.subtitle, "Johnny Cash");
        assert_eq!(card.image_url, "https://img/extralarge.png");
        assert_eq!(
            card.search_url,
            "https://www.google.com/search?q=Hurt%20Johnny%20Cash%20song"
        );
    }

    #[test]
    fn test_song_card_placeholder_for_short_or_blank_images() {
        let mut song = Song {
            title: String::new(),
            artist: "Adele".to_string(),
            image: Some(vec![SongImage {
                url: "https://img/small.png".to_string(),
                size: "small".to_string(),
            }]),
            details: Default::default(),
        };

        let card = song_card(&song);
        assert_eq!(card.title, UNKNOWN_TITLE);
        assert_eq!(card.image_url, SQUARE_PLACEHOLDER);

        song.image = Some(vec![
            SongImage {
                url: String::new(),
                size: "small".to_string(),
            };
            4
        ]);
        assert_eq!(song_card(&song).image_url, SQUARE_PLACEHOLDER);
    }

    #[test]
    fn test_build_gallery_column_order() {
        let recommendations = Recommendations {
            mood: "calm".to_string(),
            movies: vec![movie("Paterson", Some("2016-11-17"), None)],
            books: vec![],
            songs: vec![],
            generated_at: Utc::now(),
        };

        let gallery = build_gallery(&recommendations);

        let headings: Vec<_> = gallery.columns.iter().map(|c| c.heading.as_str()).collect();
        assert_eq!(headings, vec!["Movies", "Books", "Songs"]);
        assert_eq!(gallery.columns[0].items.len(), 1);
        assert!(gallery.columns[1].items.is_empty());
        assert_eq!(gallery.mood, "calm");
    }
}
