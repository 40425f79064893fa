//! Sample data for a fresh directory.

use crate::error::Result;
use crate::superheroes;
use heroes_core::{Alignment, Superhero, SuperheroDraft, Universe};
use sqlx::{Pool, Sqlite};

struct Sample {
    name: &'static str,
    real_name: &'static str,
    powers: &'static [&'static str],
    origin_story: &'static str,
    image_url: &'static str,
    alignment: Alignment,
    universe: Universe,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Spider-Man",
        real_name: "Peter Parker",
        powers: &["Web-slinging", "Wall-crawling", "Spider-sense", "Superhuman strength", "Superhuman agility"],
        origin_story: "Bitten by a radioactive spider, Peter Parker gained spider-like abilities and learned that with great power comes great responsibility.",
        image_url: "https://images.unsplash.com/photo-1635805737707-575885ab0820?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Marvel,
    },
    Sample {
        name: "Batman",
        real_name: "Bruce Wayne",
        powers: &["Martial arts mastery", "Detective skills", "Advanced technology", "Peak human conditioning", "Strategic genius"],
        origin_story: "After witnessing his parents' murder as a child, Bruce Wayne dedicated his life to fighting crime as the Dark Knight of Gotham City.",
        image_url: "https://images.unsplash.com/photo-1612036782180-6f0b6cd846fe?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Dc,
    },
    Sample {
        name: "Wonder Woman",
        real_name: "Diana Prince",
        powers: &["Superhuman strength", "Flight", "Lasso of Truth", "Bulletproof bracelets", "Combat expertise"],
        origin_story: "An Amazonian princess from Themyscira, Diana left her island home to fight alongside humanity in the world of men.",
        image_url: "https://images.unsplash.com/photo-1594736797933-d0401ba2fe65?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Dc,
    },
    Sample {
        name: "Iron Man",
        real_name: "Tony Stark",
        powers: &["Powered armor suit", "Genius-level intellect", "Arc reactor technology", "Flight", "Repulsors"],
        origin_story: "Billionaire inventor Tony Stark built a powered suit of armor to escape captivity and became the armored Avenger known as Iron Man.",
        image_url: "https://images.unsplash.com/photo-1608889476561-6242cfdbf622?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Marvel,
    },
    Sample {
        name: "The Joker",
        real_name: "Unknown",
        powers: &["Criminal mastermind", "Chemical expertise", "Unpredictability", "Immunity to toxins", "Psychological warfare"],
        origin_story: "A failed comedian who fell into a vat of chemicals, emerging as Gotham's most dangerous and unpredictable criminal mastermind.",
        image_url: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400&h=600&fit=crop",
        alignment: Alignment::Villain,
        universe: Universe::Dc,
    },
    Sample {
        name: "Green Goblin",
        real_name: "Norman Osborn",
        powers: &["Superhuman strength", "Goblin glider", "Pumpkin bombs", "Enhanced durability", "Genius intellect"],
        origin_story: "Norman Osborn, CEO of Oscorp, became the Green Goblin after exposure to an experimental formula that enhanced his abilities but drove him insane.",
        image_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=600&fit=crop",
        alignment: Alignment::Villain,
        universe: Universe::Marvel,
    },
    Sample {
        name: "Captain America",
        real_name: "Steve Rogers",
        powers: &["Super-soldier serum", "Vibranium shield", "Enhanced strength", "Enhanced speed", "Leadership"],
        origin_story: "A frail young man transformed by the Super-Soldier Serum into America's first super-soldier during World War II.",
        image_url: "https://images.unsplash.com/photo-1608889825103-eb5ed706fc64?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Marvel,
    },
    Sample {
        name: "Superman",
        real_name: "Clark Kent",
        powers: &["Flight", "Super strength", "Heat vision", "X-ray vision", "Invulnerability", "Super speed"],
        origin_story: "The last son of Krypton, sent to Earth as a baby and raised by the Kent family in Smallville, Kansas.",
        image_url: "https://images.unsplash.com/photo-1594736797933-d0401ba2fe65?w=400&h=600&fit=crop",
        alignment: Alignment::Hero,
        universe: Universe::Dc,
    },
];

/// The sample records loaded by [`seed`], in insertion order.
#[must_use]
pub fn sample_superheroes() -> Vec<SuperheroDraft> {
    SAMPLES
        .iter()
        .map(|s| SuperheroDraft {
            name: s.name.to_string(),
            real_name: s.real_name.to_string(),
            powers: s.powers.iter().map(ToString::to_string).collect(),
            origin_story: s.origin_story.to_string(),
            image_url: s.image_url.to_string(),
            alignment: s.alignment,
            universe: s.universe,
        })
        .collect()
}

/// Replace the whole directory with `samples`.
///
/// Runs in one transaction: either every record is replaced or nothing changes.
///
/// # Errors
/// Returns `DatabaseError` if clearing or inserting fails, including a
/// `Conflict` when `samples` repeats a name.
pub async fn seed(pool: &Pool<Sqlite>, samples: &[SuperheroDraft]) -> Result<Vec<Superhero>> {
    let mut tx = pool.begin().await?;

    let removed = superheroes::delete_all(&mut *tx).await?;
    tracing::info!("Cleared {} existing superheroes", removed);

    let mut created = Vec::with_capacity(samples.len());
    for draft in samples {
        created.push(superheroes::insert(&mut *tx, draft).await?);
    }

    tx.commit().await?;
    tracing::info!("Created {} sample superheroes", created.len());
    Ok(created)
}
