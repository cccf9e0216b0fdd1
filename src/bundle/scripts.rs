//! Script bundling for the theme's JS entry.
//!
//! Uses oxc: every build parses the entry (so syntax errors surface in dev
//! too); production builds additionally minify.

use std::path::Path;

use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::core::BuildMode;

/// Bundle the script entry. Returns the output content, or the parse errors
/// as compile diagnostics.
pub fn bundle(entry: &Path, source: &str, mode: BuildMode) -> Result<String, Vec<String>> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();

    if !ret.errors.is_empty() {
        let name = entry.display();
        return Err(ret
            .errors
            .iter()
            .map(|e| format!("{name}: {e}"))
            .collect());
    }

    if !mode.is_production() {
        return Ok(source.to_string());
    }

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}
