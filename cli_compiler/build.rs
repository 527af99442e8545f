// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_identifier_length: usize,
    max_literal_length: usize,
    max_expression_depth: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
    max_include_depth: usize,
    max_qualified_name_segments: usize,
    max_base_classes: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CLI_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CLI_CONFIG_DIR");

    let profile = env::var("CLI_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("CLI_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the cli_compiler directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 4096;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("LIMITS: large_file_threshold must not exceed max_file_size");
    }

    if config.syntax.max_parse_depth == 0 || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH
    {
        panic!("LIMITS: max_parse_depth must be between 1 and {}", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    if config.syntax.max_include_depth == 0 {
        panic!("LIMITS: max_include_depth must be at least 1");
    }

    if config.lexical.max_expression_depth == 0 {
        panic!("LIMITS: max_expression_depth must be at least 1");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_LITERAL_LENGTH: usize = {};
        pub const MAX_EXPRESSION_DEPTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
        pub const MAX_INCLUDE_DEPTH: usize = {};
        pub const MAX_QUALIFIED_NAME_SEGMENTS: usize = {};
        pub const MAX_BASE_CLASSES: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
    }}
}}
"#,
        profile,
        // File processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count,
        // Lexical
        config.lexical.max_identifier_length,
        config.lexical.max_literal_length,
        config.lexical.max_expression_depth,
        // Syntax
        config.syntax.max_parse_depth,
        config.syntax.max_include_depth,
        config.syntax.max_qualified_name_segments,
        config.syntax.max_base_classes,
        // Logging
        config.logging.max_error_collection,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
    );

    fs::write(output_path, constants_code).unwrap();
}
