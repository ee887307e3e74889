use std::time::Duration;

pub const NOT_AVAILABLE: &str = "N/A";

// Quiz round shape
pub const QUESTIONS_PER_ROUND: usize = 10;
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

// Generated dataset documents
pub const STANDARD_DATASET_FILE: &str = "characters-en.json";
pub const RANDOM_DATASET_FILE: &str = "characters-random-en.json";

// Portraits follow a `hd_<char_id>_<card_id>.png` naming convention
pub const IMAGE_DIR: &str = "images/character_hd";

pub fn image_prefix(char_id: &str) -> String {
    format!("hd_{char_id}_")
}

pub fn image_file_name(char_id: &str, card_id: &str) -> String {
    format!("hd_{char_id}_{card_id}.png")
}

pub fn image_url(base_url: &str, file_name: &str) -> String {
    format!("{base_url}/{IMAGE_DIR}/{file_name}")
}

pub fn dataset_api_url(file_name: &str) -> String {
    format!("/api/{file_name}")
}

// i18n
pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "id"];
