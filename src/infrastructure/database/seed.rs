//! Demo catalog loaded by `--seed` into an empty database.

use tracing::info;

use crate::domain::{MovieRepository, NewMovie};
use crate::shared::DomainResult;

const PEXELS: &str = "https://images.pexels.com/photos";

struct SeedMovie {
    title: &'static str,
    year: i32,
    runtime: i32,
    rating: f64,
    genres: &'static [&'static str],
    director: &'static str,
    photo: u32,
    overview: &'static str,
}

const CATALOG: &[SeedMovie] = &[
    SeedMovie {
        title: "Dune: Part Two",
        year: 2024,
        runtime: 166,
        rating: 8.8,
        genres: &["Sci-Fi", "Adventure"],
        director: "Denis Villeneuve",
        photo: 631954,
        overview: "Paul Atreides unites with Chani and the Fremen while seeking revenge against the conspirators who destroyed his family.",
    },
    SeedMovie {
        title: "Oppenheimer",
        year: 2023,
        runtime: 180,
        rating: 8.4,
        genres: &["Drama", "History"],
        director: "Christopher Nolan",
        photo: 2387793,
        overview: "The story of American scientist J. Robert Oppenheimer and his role in the development of the atomic bomb.",
    },
    SeedMovie {
        title: "The Batman",
        year: 2022,
        runtime: 176,
        rating: 7.8,
        genres: &["Action", "Crime"],
        director: "Matt Reeves",
        photo: 1181671,
        overview: "When the Riddler, a sadistic serial killer, begins murdering key political figures in Gotham, Batman must track down the killer.",
    },
    SeedMovie {
        title: "Avatar: The Way of Water",
        year: 2022,
        runtime: 192,
        rating: 7.6,
        genres: &["Sci-Fi", "Adventure"],
        director: "James Cameron",
        photo: 3945313,
        overview: "Jake Sully lives with his newfound family on the extrasolar moon Pandora.",
    },
    SeedMovie {
        title: "Top Gun: Maverick",
        year: 2022,
        runtime: 130,
        rating: 8.3,
        genres: &["Action", "Drama"],
        director: "Joseph Kosinski",
        photo: 163077,
        overview: "After thirty years, Maverick is still pushing the envelope as a top naval aviator.",
    },
    SeedMovie {
        title: "Everything Everywhere All at Once",
        year: 2022,
        runtime: 139,
        rating: 7.8,
        genres: &["Comedy", "Sci-Fi"],
        director: "Daniel Kwan",
        photo: 1337380,
        overview: "A middle-aged laundromat owner is swept up in an insane adventure across the multiverse.",
    },
    SeedMovie {
        title: "Spider-Man: No Way Home",
        year: 2021,
        runtime: 148,
        rating: 8.2,
        genres: &["Action", "Adventure"],
        director: "Jon Watts",
        photo: 1319854,
        overview: "With Spider-Man's identity revealed, Peter asks Doctor Strange for help.",
    },
    SeedMovie {
        title: "Black Panther: Wakanda Forever",
        year: 2022,
        runtime: 161,
        rating: 6.7,
        genres: &["Action", "Drama"],
        director: "Ryan Coogler",
        photo: 2387793,
        overview: "The people of Wakanda fight to protect their home from intervening world powers.",
    },
    SeedMovie {
        title: "Interstellar",
        year: 2014,
        runtime: 169,
        rating: 8.7,
        genres: &["Sci-Fi", "Drama"],
        director: "Christopher Nolan",
        photo: 2832382,
        overview: "A team of explorers travel through a wormhole in space to ensure humanity's survival.",
    },
    SeedMovie {
        title: "Inception",
        year: 2010,
        runtime: 148,
        rating: 8.8,
        genres: &["Sci-Fi", "Action"],
        director: "Christopher Nolan",
        photo: 1181671,
        overview: "A thief who steals corporate secrets through dream-sharing technology is given the inverse task.",
    },
    SeedMovie {
        title: "The Dark Knight",
        year: 2008,
        runtime: 152,
        rating: 9.0,
        genres: &["Action", "Crime", "Drama"],
        director: "Christopher Nolan",
        photo: 631954,
        overview: "Batman faces the Joker, a criminal mastermind who wants to plunge Gotham into anarchy.",
    },
];

fn to_new_movie(seed: &SeedMovie) -> NewMovie {
    let image = |w: u32, h: u32| {
        format!(
            "{PEXELS}/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w={w}&h={h}&fit=crop",
            id = seed.photo
        )
    };
    NewMovie {
        runtime: Some(seed.runtime),
        rating: Some(seed.rating),
        genres: seed.genres.iter().map(|g| g.to_string()).collect(),
        languages: vec!["English".to_string()],
        backdrop_url: Some(image(1920, 1080)),
        poster_url: Some(image(400, 600)),
        overview: Some(seed.overview.to_string()),
        director: Some(seed.director.to_string()),
        country: Some("US".to_string()),
        age_rating: Some("PG-13".to_string()),
        ..NewMovie::new(seed.title, seed.year)
    }
}

/// Inserts the demo catalog unless the movies table already has rows.
/// Returns the number of movies inserted.
pub async fn seed_catalog(movies: &dyn MovieRepository) -> DomainResult<usize> {
    if movies.count().await? > 0 {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    for seed in CATALOG {
        movies.insert(to_new_movie(seed)).await?;
    }
    info!("Seeded {} movies", CATALOG.len());
    Ok(CATALOG.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::movie_repository::SeaOrmMovieRepository;
    use crate::infrastructure::database::test_database;

    #[tokio::test]
    async fn seeds_once() {
        let repo = SeaOrmMovieRepository::new(test_database().await);
        assert_eq!(seed_catalog(&repo).await.unwrap(), CATALOG.len());
        assert_eq!(seed_catalog(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), CATALOG.len() as u64);
    }
}
