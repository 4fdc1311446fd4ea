use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Picks one book uniformly at random from the whole table
pub fn pick_random<'a, R: Rng + ?Sized>(books: &'a [Book], rng: &mut R) -> AppResult<&'a Book> {
    books.choose(rng).ok_or(AppError::NoBooks)
}

/// Picks one book uniformly at random among those whose `mood_tag` equals `tag`
///
/// Matching is exact and case-sensitive. A missing or empty tag is rejected
/// before the table is looked at.
pub fn pick_by_mood<'a, R: Rng + ?Sized>(
    books: &'a [Book],
    tag: Option<&str>,
    rng: &mut R,
) -> AppResult<&'a Book> {
    let tag = match tag {
        Some(tag) if !tag.is_empty() => tag,
        _ => return Err(AppError::MissingTagParam),
    };

    let matching: Vec<&Book> = books.iter().filter(|book| book.mood_tag == tag).collect();

    matching
        .choose(rng)
        .copied()
        .ok_or(AppError::NoBooksForMood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    fn book(title: &str, mood_tag: &str) -> Book {
        Book {
            title: title.to_string(),
            author: format!("Author of {title}"),
            genre: "fiction".to_string(),
            mood_tag: mood_tag.to_string(),
            energy: "medium".to_string(),
            notes: String::new(),
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book("A", "soft_slow"),
            book("B", "chaos_fun"),
            book("C", "soft_slow"),
            book("D", "Soft_Slow"),
            book("E", "thinky"),
        ]
    }

    #[test]
    fn test_pick_random_empty_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert!(matches!(pick_random(&[], &mut rng), Err(AppError::NoBooks)));
        }
    }

    #[test]
    fn test_pick_random_only_returns_table_rows() {
        let books = shelf();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let picked = pick_random(&books, &mut rng).unwrap();
            assert!(books.contains(picked));
        }
    }

    #[test]
    fn test_pick_random_is_roughly_uniform() {
        let books = shelf();
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 10_000;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..draws {
            let picked = pick_random(&books, &mut rng).unwrap();
            *counts.entry(picked.title.as_str()).or_default() += 1;
        }

        let expected = draws / books.len();
        assert_eq!(counts.len(), books.len());
        for (title, count) in counts {
            assert!(
                count.abs_diff(expected) < expected / 5,
                "{title} picked {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_pick_random_same_seed_same_pick() {
        let books = shelf();
        let first = pick_random(&books, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = pick_random(&books, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_by_mood_missing_or_empty_tag() {
        let mut rng = StdRng::seed_from_u64(1);
        let books = shelf();

        assert!(matches!(
            pick_by_mood(&books, None, &mut rng),
            Err(AppError::MissingTagParam)
        ));
        assert!(matches!(
            pick_by_mood(&books, Some(""), &mut rng),
            Err(AppError::MissingTagParam)
        ));
        // Checked before the table: an empty table still reports the missing tag
        assert!(matches!(
            pick_by_mood(&[], Some(""), &mut rng),
            Err(AppError::MissingTagParam)
        ));
    }

    #[test]
    fn test_pick_by_mood_exact_match_only() {
        let books = shelf();
        let mut rng = StdRng::seed_from_u64(5);

        let mut seen = Vec::new();
        for _ in 0..200 {
            let picked = pick_by_mood(&books, Some("soft_slow"), &mut rng).unwrap();
            assert_eq!(picked.mood_tag, "soft_slow");
            if !seen.contains(&picked.title) {
                seen.push(picked.title.clone());
            }
        }

        seen.sort();
        assert_eq!(seen, vec!["A", "C"]);
    }

    #[test]
    fn test_pick_by_mood_is_roughly_uniform_within_tag() {
        let books = shelf();
        let mut rng = StdRng::seed_from_u64(99);
        let draws = 10_000;

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for _ in 0..draws {
            let picked = pick_by_mood(&books, Some("soft_slow"), &mut rng).unwrap();
            *counts.entry(picked.title.as_str()).or_default() += 1;
        }

        let expected = draws / 2;
        assert_eq!(counts.len(), 2);
        for (title, count) in counts {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "{title} picked {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn test_pick_by_mood_is_case_sensitive() {
        let books = vec![book("D", "Soft_Slow")];
        let mut rng = StdRng::seed_from_u64(9);

        assert!(matches!(
            pick_by_mood(&books, Some("soft_slow"), &mut rng),
            Err(AppError::NoBooksForMood)
        ));
        assert_eq!(
            pick_by_mood(&books, Some("Soft_Slow"), &mut rng).unwrap().title,
            "D"
        );
    }

    #[test]
    fn test_pick_by_mood_no_match() {
        let books = shelf();
        let mut rng = StdRng::seed_from_u64(2);

        assert!(matches!(
            pick_by_mood(&books, Some("deep_dive"), &mut rng),
            Err(AppError::NoBooksForMood)
        ));
        assert!(matches!(
            pick_by_mood(&books, Some("soft"), &mut rng),
            Err(AppError::NoBooksForMood)
        ));
    }
}
