use crate::shared::errors::AppError;

/// TMDB refuses pages beyond this bound
pub const MAX_PAGE: u32 = 500;

pub struct Validator;

impl Validator {
    pub fn validate_movie_id(id: u32) -> Result<(), AppError> {
        if id == 0 {
            return Err(AppError::ValidationError(
                "Movie id must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_page(page: u32) -> Result<(), AppError> {
        if !(1..=MAX_PAGE).contains(&page) {
            return Err(AppError::ValidationError(format!(
                "Page must be between 1 and {}",
                MAX_PAGE
            )));
        }
        Ok(())
    }

    pub fn validate_search_query(query: &str) -> Result<(), AppError> {
        if query.chars().count() > 200 {
            return Err(AppError::ValidationError(
                "Search query too long (max 200 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_position(seconds: f64) -> Result<(), AppError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AppError::ValidationError(
                "Playback position must be a non-negative number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}
