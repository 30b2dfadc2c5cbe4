//! Minimal file-type tagging compatible with the tags pre-commit hooks use
//! in `types`, `types_or` and `exclude_types`.
//!
//! Tags are derived from the file name alone; contents are never inspected.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::LazyLock;

const EXTENSION_TAGS: &[(&str, &[&str])] = &[
    ("py", &["python"]),
    ("pyi", &["python", "pyi"]),
    ("pyw", &["python"]),
    ("js", &["javascript"]),
    ("mjs", &["javascript"]),
    ("cjs", &["javascript"]),
    ("jsx", &["jsx"]),
    ("ts", &["ts"]),
    ("tsx", &["tsx"]),
    ("rs", &["rust"]),
    ("go", &["go"]),
    ("java", &["java"]),
    ("kt", &["kotlin"]),
    ("scala", &["scala"]),
    ("c", &["c"]),
    ("h", &["c", "c++", "header"]),
    ("cc", &["c++"]),
    ("cpp", &["c++"]),
    ("cxx", &["c++"]),
    ("hpp", &["c++", "header"]),
    ("cs", &["c#"]),
    ("rb", &["ruby"]),
    ("php", &["php"]),
    ("swift", &["swift"]),
    ("dart", &["dart"]),
    ("lua", &["lua"]),
    ("pl", &["perl"]),
    ("r", &["r"]),
    ("sh", &["shell", "sh"]),
    ("bash", &["shell", "bash"]),
    ("zsh", &["shell", "zsh"]),
    ("sql", &["sql"]),
    ("html", &["html"]),
    ("htm", &["html"]),
    ("css", &["css"]),
    ("scss", &["scss"]),
    ("vue", &["vue"]),
    ("svelte", &["svelte"]),
    ("yaml", &["yaml"]),
    ("yml", &["yaml"]),
    ("json", &["json"]),
    ("toml", &["toml"]),
    ("xml", &["xml"]),
    ("ini", &["ini"]),
    ("cfg", &["ini"]),
    ("md", &["markdown"]),
    ("rst", &["rst"]),
    ("txt", &["plain-text"]),
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "pdf", "zip", "gz", "tgz", "tar", "xz",
    "bz2", "7z", "whl", "jar", "class", "pyc", "so", "dll", "dylib", "exe", "o", "a", "woff",
    "woff2", "ttf", "otf", "eot", "mp3", "mp4", "wav", "ogg", "mov", "avi",
];

const FILENAME_TAGS: &[(&str, &[&str])] = &[
    ("Makefile", &["makefile"]),
    ("makefile", &["makefile"]),
    ("Dockerfile", &["dockerfile"]),
    ("CMakeLists.txt", &["cmake"]),
    ("Gemfile", &["ruby"]),
    ("Rakefile", &["ruby"]),
];

static EXTENSION_MAP: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| EXTENSION_TAGS.iter().copied().collect());

/// Returns the type tags for `path`.
///
/// Every path is tagged `file`, plus either `text` or `binary`.
#[must_use]
pub fn tags_for_path(path: &Path) -> BTreeSet<&'static str> {
    let mut tags = BTreeSet::from(["file"]);

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if let Some((_, extra)) = FILENAME_TAGS.iter().find(|(name, _)| *name == file_name) {
        tags.insert("text");
        tags.extend(extra.iter().copied());
        return tags;
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if BINARY_EXTENSIONS.contains(&ext.as_str()) {
        tags.insert("binary");
        return tags;
    }

    tags.insert("text");
    if let Some(extra) = EXTENSION_MAP.get(ext.as_str()) {
        tags.extend(extra.iter().copied());
    }
    tags
}
