/// Utility functions

/// Seeded pseudo-random integer in `[min, max)`.
///
/// Mirrors the dashboard's historical derivation exactly:
/// `min + floor(|sin(seed) * 10000|) mod (max - min)`. Charts rendered by
/// independent clients must agree on colors, so this must stay
/// bit-reproducible.
pub fn rand_between(seed: i64, min: i64, max: i64) -> i64 {
    min + (((seed as f64).sin() * 10000.0).abs().floor() as i64) % (max - min)
}

/// Derive a deterministic `#rrggbb` color from a string.
///
/// The seed XORs the 1st and 4th UTF-16 code units; a missing code unit
/// counts as 0 (strings shorter than 4 characters are common for
/// nationality labels). Channel ranges are disjoint so no channel ever
/// needs a leading zero.
pub fn color_from_string(s: &str) -> String {
    let unit = |n: usize| s.encode_utf16().nth(n).map(i64::from).unwrap_or(0);
    let seed = unit(0) ^ unit(3);

    let r = rand_between(seed + 1, 50, 230);
    let g = rand_between(seed + 2, 80, 200);
    let b = rand_between(seed + 3, 20, 250);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rand_between_stays_in_range() {
        for seed in -50..50 {
            let v = rand_between(seed, 50, 230);
            assert!((50..230).contains(&v), "seed {} produced {}", seed, v);
        }
    }

    #[test]
    fn test_rand_between_is_deterministic() {
        assert_eq!(rand_between(7, 20, 250), rand_between(7, 20, 250));
    }

    #[test]
    fn test_color_from_string_is_deterministic() {
        let a = color_from_string("France");
        let b = color_from_string("France");
        assert_eq!(a, b);
    }

    #[test]
    fn test_color_from_string_format() {
        for name in ["US", "France", "China", "", "Japan"] {
            let color = color_from_string(name);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_color_channels_within_bounds() {
        for name in ["US", "France", "China", "Japan", "United Kingdom"] {
            let color = color_from_string(name);
            let r = i64::from_str_radix(&color[1..3], 16).unwrap();
            let g = i64::from_str_radix(&color[3..5], 16).unwrap();
            let b = i64::from_str_radix(&color[5..7], 16).unwrap();
            assert!((50..230).contains(&r));
            assert!((80..200).contains(&g));
            assert!((20..250).contains(&b));
        }
    }

    #[test]
    fn test_color_short_string_uses_zero_for_missing_unit() {
        // "US" has no 4th code unit, so the seed is just 'U'
        let direct = color_from_string("US");
        let padded = color_from_string("US\0\0");
        assert_eq!(direct, padded);
    }
}
