use once_cell::sync::Lazy;
use regex::Regex;

use crate::Review;

/// Grammar for the rating marker the model is instructed to lead with.
static RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RATING:\s*(\d+)\s*/\s*5\s*stars").unwrap());

/// Parse raw model output into a Review.
///
/// A reply without the `RATING:` marker, with a non-numeric token, or with a
/// value outside 1-5 becomes an unrated review carrying the full reply as
/// commentary (graceful degradation — never a panic).
pub fn parse_review(raw: &str) -> Review {
    let Some(rating) = extract_rating(raw) else {
        return Review {
            rating: None,
            commentary: raw.to_string(),
        };
    };

    // Commentary is everything after the first "stars" in the reply, trimmed.
    let commentary = match raw.split_once("stars") {
        Some((_, rest)) => rest.trim().to_string(),
        None => raw.to_string(),
    };

    Review {
        rating: Some(rating),
        commentary,
    }
}

fn extract_rating(raw: &str) -> Option<u8> {
    if !raw.contains("RATING:") {
        return None;
    }
    let caps = RATING_RE.captures(raw)?;
    let value: u8 = caps[1].parse().ok()?;
    (1..=5).contains(&value).then_some(value)
}

/// Star-glyph display for a rating on the fixed 1-5 scale.
pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Band;

    #[test]
    fn well_formed_reply_yields_rating_and_commentary() {
        let review = parse_review("RATING: 4/5 stars\nWhat works: clear goal");
        assert_eq!(review.rating, Some(4));
        assert_eq!(review.commentary, "What works: clear goal");
    }

    #[test]
    fn missing_marker_returns_full_reply_unchanged() {
        let review = parse_review("no marker here");
        assert_eq!(review.rating, None);
        assert_eq!(review.commentary, "no marker here");
    }

    #[test]
    fn bare_rating_has_empty_commentary() {
        let review = parse_review("RATING: 5/5 stars");
        assert_eq!(review.rating, Some(5));
        assert_eq!(review.commentary, "");
        assert_eq!(review.band(), Some(Band::Excellent));
    }

    #[test]
    fn out_of_range_rating_falls_back_to_unrated() {
        let raw = "RATING: 0/5 stars\nsomething";
        let review = parse_review(raw);
        assert_eq!(review.rating, None);
        assert_eq!(review.commentary, raw);

        let review = parse_review("RATING: 6/5 stars");
        assert_eq!(review.rating, None);
    }

    #[test]
    fn non_numeric_rating_falls_back_to_unrated() {
        let raw = "RATING: abc/5 stars\nsomething";
        let review = parse_review(raw);
        assert_eq!(review.rating, None);
        assert_eq!(review.commentary, raw);
    }

    #[test]
    fn huge_numeric_token_does_not_panic() {
        let review = parse_review("RATING: 99999999999/5 stars");
        assert_eq!(review.rating, None);
    }

    #[test]
    fn whitespace_inside_marker_is_tolerated() {
        let review = parse_review("RATING:  3 / 5  stars\nOK");
        assert_eq!(review.rating, Some(3));
        assert_eq!(review.commentary, "OK");
    }

    #[test]
    fn star_glyphs_fill_to_five() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(5), "★★★★★");
    }
}
