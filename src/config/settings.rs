#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub min_username_len: usize,
    pub min_password_len: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_ttl_hours: 24,
            bcrypt_cost: 10,
            min_username_len: 3,
            min_password_len: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginationSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            max_page_size: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub min_rating: i64,
    pub max_rating: i64,
    pub min_text_len: usize,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            min_rating: 1,
            max_rating: 5,
            min_text_len: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BookSettings {
    pub min_field_len: usize,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self { min_field_len: 2 }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub auth: AuthSettings,
    pub pagination: PaginationSettings,
    pub review: ReviewSettings,
    pub book: BookSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            auth: AuthSettings::default(),
            pagination: PaginationSettings::default(),
            review: ReviewSettings::default(),
            book: BookSettings::default(),
        }
    }
}

// Passed explicitly (Dependency Injection) rather than kept in a global.
