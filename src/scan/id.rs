use rand::Rng;

pub const MIN_ID: u16 = 100;
pub const MAX_ID: u16 = 999;

/// Draws three-digit ids until one is not taken.
///
/// Uniqueness is only against `is_taken` at call time. With all 900 ids taken
/// this never returns.
pub fn allocate_id<R, F>(rng: &mut R, is_taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let candidate = rng.gen_range(MIN_ID..=MAX_ID).to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
    }
}
