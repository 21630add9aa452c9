use std::path::PathBuf;

/// Errors that can occur when building a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("invalid grid shape: row {row} has {found} columns, expected {expected}")]
    InvalidGridShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile {value} at ({row}, {col}): must be 0 or a power of two")]
    InvalidTile { row: usize, col: usize, value: u32 },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_shape_display() {
        let err = GridError::InvalidGridShape {
            row: 2,
            expected: 4,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid grid shape: row 2 has 3 columns, expected 4"
        );
    }

    #[test]
    fn test_invalid_tile_display() {
        let err = GridError::InvalidTile {
            row: 0,
            col: 1,
            value: 3,
        };
        assert_eq!(
            err.to_string(),
            "invalid tile 3 at (0, 1): must be 0 or a power of two"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("game.rows must be >= 1".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: game.rows must be >= 1"
        );
    }
}
