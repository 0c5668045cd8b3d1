pub mod random;

pub use random::RandomGenerator;

/// Trait for generating random tokens.
///
/// Implementations are pure generators that don't interact with storage;
/// uniqueness is enforced by the link store, not here. The same generator
/// produces both link ids and admin passwords.
pub trait Generator: Send + Sync + 'static {
    /// Produces a URL-safe token of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}
