//! Bundled language definitions and the registry over them.
//!
//! Each language module is pure data: node-type tables plus calculation
//! config, in the shape `crate::analysis::definition` defines. The
//! registry compiles every definition once behind a `Lazy` and hands out
//! `&'static` references, so concurrent analyses share them read-only
//! with no locking.

mod c;
mod cpp;
mod go;
mod java;
mod javascript;
mod python;
mod rust_lang;
mod scala;
mod swift;
mod typescript;

use once_cell::sync::Lazy;
use phf::phf_map;

use crate::analysis::compile::CompiledDefinition;

/// A registered language: identifier, extensions, grammar and the
/// compiled definition.
pub struct LanguageSupport {
    pub id: &'static str,
    pub extensions: &'static [&'static str],
    grammar: tree_sitter::Language,
    pub compiled: CompiledDefinition,
}

impl LanguageSupport {
    fn new(
        id: &'static str,
        extensions: &'static [&'static str],
        grammar: tree_sitter::Language,
        definition: crate::analysis::definition::LanguageDefinition,
    ) -> Self {
        Self {
            id,
            extensions,
            grammar,
            compiled: CompiledDefinition::compile(definition),
        }
    }

    /// Parse source with this language's grammar.
    ///
    /// tree-sitter returns a tree even for malformed input (ERROR nodes
    /// inside); `None` only on empty input by our own short-circuit.
    pub fn parse(&self, source: &str) -> anyhow::Result<tree_sitter::Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&self.grammar)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("tree-sitter returned no tree for {}", self.id))
    }
}

static C: Lazy<LanguageSupport> =
    Lazy::new(|| LanguageSupport::new("c", &["c", "h"], c::grammar(), c::definition()));
static CPP: Lazy<LanguageSupport> = Lazy::new(|| {
    LanguageSupport::new(
        "cpp",
        &["cpp", "cc", "cxx", "hpp", "hh"],
        cpp::grammar(),
        cpp::definition(),
    )
});
static GO: Lazy<LanguageSupport> =
    Lazy::new(|| LanguageSupport::new("go", &["go"], go::grammar(), go::definition()));
static JAVA: Lazy<LanguageSupport> =
    Lazy::new(|| LanguageSupport::new("java", &["java"], java::grammar(), java::definition()));
static JAVASCRIPT: Lazy<LanguageSupport> = Lazy::new(|| {
    LanguageSupport::new(
        "javascript",
        &["js", "jsx", "mjs", "cjs"],
        javascript::grammar(),
        javascript::definition(),
    )
});
static PYTHON: Lazy<LanguageSupport> =
    Lazy::new(|| LanguageSupport::new("python", &["py"], python::grammar(), python::definition()));
static RUST: Lazy<LanguageSupport> = Lazy::new(|| {
    LanguageSupport::new("rust", &["rs"], rust_lang::grammar(), rust_lang::definition())
});
static SCALA: Lazy<LanguageSupport> = Lazy::new(|| {
    LanguageSupport::new("scala", &["scala", "sc"], scala::grammar(), scala::definition())
});
static SWIFT: Lazy<LanguageSupport> =
    Lazy::new(|| LanguageSupport::new("swift", &["swift"], swift::grammar(), swift::definition()));
static TYPESCRIPT: Lazy<LanguageSupport> = Lazy::new(|| {
    LanguageSupport::new(
        "typescript",
        &["ts", "tsx", "mts"],
        typescript::grammar(),
        typescript::definition(),
    )
});

/// All registered language ids, in registry order.
const LANGUAGE_IDS: &[&str] = &[
    "c",
    "cpp",
    "go",
    "java",
    "javascript",
    "python",
    "rust",
    "scala",
    "swift",
    "typescript",
];

/// Static extension -> language id map (extensions without the dot).
static EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "c" => "c",
    "h" => "c",
    "cpp" => "cpp",
    "cc" => "cpp",
    "cxx" => "cpp",
    "hpp" => "cpp",
    "hh" => "cpp",
    "go" => "go",
    "java" => "java",
    "js" => "javascript",
    "jsx" => "javascript",
    "mjs" => "javascript",
    "cjs" => "javascript",
    "py" => "python",
    "rs" => "rust",
    "scala" => "scala",
    "sc" => "scala",
    "swift" => "swift",
    "ts" => "typescript",
    "tsx" => "typescript",
    "mts" => "typescript",
};

/// Look a language up by its id.
pub fn by_id(id: &str) -> Option<&'static LanguageSupport> {
    match id {
        "c" => Some(&C),
        "cpp" => Some(&CPP),
        "go" => Some(&GO),
        "java" => Some(&JAVA),
        "javascript" => Some(&JAVASCRIPT),
        "python" => Some(&PYTHON),
        "rust" => Some(&RUST),
        "scala" => Some(&SCALA),
        "swift" => Some(&SWIFT),
        "typescript" => Some(&TYPESCRIPT),
        _ => None,
    }
}

/// Look a language up by file extension (with or without a leading dot).
pub fn by_extension(ext: &str) -> Option<&'static LanguageSupport> {
    let ext = ext.trim_start_matches('.');
    EXTENSIONS.get(ext).and_then(|id| by_id(id))
}

/// Resolve a language id or a file extension.
pub fn resolve(id_or_extension: &str) -> Option<&'static LanguageSupport> {
    by_id(id_or_extension).or_else(|| by_extension(id_or_extension))
}

/// All registered language ids.
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGE_IDS.to_vec()
}

/// All registered file extensions (without dots), sorted.
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions: Vec<&'static str> = EXTENSIONS.keys().copied().collect();
    extensions.sort_unstable();
    extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves() {
        for id in LANGUAGE_IDS {
            assert!(by_id(id).is_some(), "language {id} not registered");
        }
    }

    #[test]
    fn extensions_resolve_with_and_without_dot() {
        assert_eq!(by_extension("rs").map(|l| l.id), Some("rust"));
        assert_eq!(by_extension(".rs").map(|l| l.id), Some("rust"));
        assert!(by_extension("unknown").is_none());
    }

    #[test]
    fn resolve_accepts_ids_and_extensions() {
        assert_eq!(resolve("typescript").map(|l| l.id), Some("typescript"));
        assert_eq!(resolve("ts").map(|l| l.id), Some("typescript"));
        assert!(resolve("cobol").is_none());
    }

    #[test]
    fn every_extension_maps_to_a_registered_language() {
        for ext in supported_extensions() {
            assert!(by_extension(ext).is_some(), "extension {ext} dangles");
        }
    }
}
