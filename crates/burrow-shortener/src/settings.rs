use typed_builder::TypedBuilder;

/// Tuning knobs for [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct ShortenerSettings {
    /// Length of generated ids before any growth.
    #[builder(default = 4)]
    pub initial_id_length: usize,
    /// Collisions tolerated at one length before the id length grows.
    #[builder(default = 3)]
    pub collisions_before_growth: usize,
    /// Insert attempts per create before giving up.
    #[builder(default = 16)]
    pub max_attempts: usize,
    /// Upper bound for id growth.
    #[builder(default = 32)]
    pub max_id_length: usize,
    #[builder(default = 64)]
    pub admin_password_length: usize,
    /// Longest accepted target URL, in bytes.
    #[builder(default = 512)]
    pub max_url_length: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
