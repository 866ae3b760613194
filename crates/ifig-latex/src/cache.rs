//! The LaTeX rasterization cache.
//!
//! Cache entries are content-addressed: the file name is a sha256 over the
//! input text, font size, dpi, border and preamble, so identical inputs
//! always resolve to the same file without recomputation, across sessions
//! and across concurrent build processes. Entries are produced in a
//! temporary directory inside the cache directory and renamed into place,
//! which keeps the write atomic on the same filesystem; concurrent callers
//! never observe a partially-written entry.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{LatexError, Result};

/// The label rasterization collaborator consumed by the grid compositor.
///
/// Implementations must be content-addressable (identical arguments resolve
/// to the same file without redoing the work) and must surface toolchain
/// failures with the offending input and the tool's diagnostics intact.
pub trait LabelRasterizer {
    /// Rasterizes `text` to a PNG and returns the path to the cached file.
    fn rasterize(&self, text: &str, fontsize: f32, dpi: u32, border: [f32; 4]) -> Result<PathBuf>;
}

/// Converts text to PNG via `pdflatex` and ImageMagick `convert`, caching
/// the results in a directory for reuse between sessions. Entries are
/// lazily populated and never invalidated within a process.
#[derive(Debug, Clone)]
pub struct LatexCache {
    cache_dir: PathBuf,
    preamble: String,
}

const DEFAULT_PREAMBLE: &str = "\\usepackage{amsmath}\n\\usepackage{amssymb}";

impl LatexCache {
    /// Opens (creating if needed) a cache rooted at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            cache_dir,
            preamble: DEFAULT_PREAMBLE.to_string(),
        })
    }

    /// Replaces the preamble added to every generated document. The
    /// preamble participates in the content hash, so entries rendered under
    /// a different preamble never alias.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// The cache path the given inputs resolve to, whether or not the entry
    /// exists yet.
    pub fn png_path(&self, text: &str, fontsize: f32, dpi: u32, border: [f32; 4]) -> PathBuf {
        self.basefile(text, fontsize, Some(dpi), border)
            .with_extension("png")
    }

    fn basefile(&self, text: &str, fontsize: f32, dpi: Option<u32>, border: [f32; 4]) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update(self.preamble.as_bytes());
        hasher.update(format!("{fontsize:.6}").as_bytes());
        if let Some(dpi) = dpi {
            hasher.update(dpi.to_string().as_bytes());
        }
        for edge in border {
            hasher.update(format!("{edge:.6}-").as_bytes());
        }
        self.cache_dir.join(hex::encode(hasher.finalize()))
    }

    fn write_tex(&self, text: &str, fontsize: f32, border: [f32; 4]) -> Result<PathBuf> {
        let texfile = self
            .basefile(text, fontsize, None, border)
            .with_extension("tex");
        let document = format!(
            "\\documentclass[border={{{}pt {}pt {}pt {}pt}}]{{standalone}}\n\
             {}\n\
             \\pagestyle{{empty}}\n\
             \\begin{{document}}\n\
             \\fontsize{{{fontsize}}}{{{baseline}}}\\selectfont\n\
             {text}\n\
             \\end{{document}}\n",
            border[0],
            border[1],
            border[2],
            border[3],
            self.preamble,
            fontsize = fontsize,
            baseline = fontsize * 1.25,
            text = text,
        );
        fs::write(&texfile, document)?;
        Ok(texfile)
    }

    /// Compiles the text to PDF if no cached copy exists yet.
    fn ensure_pdf(&self, text: &str, fontsize: f32, border: [f32; 4]) -> Result<PathBuf> {
        let pdffile = self
            .basefile(text, fontsize, None, border)
            .with_extension("pdf");
        if pdffile.exists() {
            return Ok(pdffile);
        }
        let texfile = self.write_tex(text, fontsize, border)?;
        // Compile in a temporary directory inside the cache directory:
        // concurrent processes compiling the same text race only on the
        // final rename, which replaces atomically on the same filesystem.
        let staging = tempfile::tempdir_in(&self.cache_dir)?;
        let args = ["-interaction=nonstopmode", "--halt-on-error"];
        // pdflatex runs twice so packages that measure on the first pass
        // settle their bounding boxes.
        run_checked("pdflatex", &args, &texfile, staging.path(), text)?;
        run_checked("pdflatex", &args, &texfile, staging.path(), text)?;
        let produced = staging.path().join(pdffile.file_name().unwrap_or_default());
        fs::rename(&produced, &pdffile)?;
        Ok(pdffile)
    }

    /// Rasterizes `text` at the given font size, dpi and border (points per
    /// edge), returning the cached PNG path. A cache hit does no work.
    pub fn rasterize(
        &self,
        text: &str,
        fontsize: f32,
        dpi: u32,
        border: [f32; 4],
    ) -> Result<PathBuf> {
        let pngfile = self.png_path(text, fontsize, dpi, border);
        if pngfile.exists() {
            debug!(path = %pngfile.display(), "rasterization cache hit");
            return Ok(pngfile);
        }
        let pdffile = self.ensure_pdf(text, fontsize, border)?;
        let staging = tempfile::tempdir_in(&self.cache_dir)?;
        let staged = staging.path().join("out.png");
        let density = dpi.to_string();
        let output = Command::new("convert")
            .arg("-density")
            .arg(&density)
            .arg(&pdffile)
            .arg(&staged)
            .output()
            .map_err(|source| map_spawn_error("convert", text, source))?;
        if !output.status.success() {
            return Err(LatexError::CompileFailed {
                program: "convert".to_string(),
                input: text.to_string(),
                diagnostics: collect_diagnostics(&output.stdout, &output.stderr),
            });
        }
        fs::rename(&staged, &pngfile)?;
        debug!(path = %pngfile.display(), "rasterized label");
        Ok(pngfile)
    }
}

impl LabelRasterizer for LatexCache {
    fn rasterize(&self, text: &str, fontsize: f32, dpi: u32, border: [f32; 4]) -> Result<PathBuf> {
        LatexCache::rasterize(self, text, fontsize, dpi, border)
    }
}

fn run_checked(
    program: &str,
    args: &[&str],
    file: &Path,
    cwd: &Path,
    input: &str,
) -> Result<()> {
    debug!(program, file = %file.display(), "running tex tool");
    let output = Command::new(program)
        .args(args)
        .arg(file)
        .current_dir(cwd)
        .output()
        .map_err(|source| map_spawn_error(program, input, source))?;
    if !output.status.success() {
        return Err(LatexError::CompileFailed {
            program: program.to_string(),
            input: input.to_string(),
            diagnostics: collect_diagnostics(&output.stdout, &output.stderr),
        });
    }
    Ok(())
}

fn map_spawn_error(program: &str, input: &str, source: std::io::Error) -> LatexError {
    if source.kind() == std::io::ErrorKind::NotFound {
        LatexError::CompilerNotFound {
            program: program.to_string(),
            input: input.to_string(),
        }
    } else {
        LatexError::Io(source)
    }
}

fn collect_diagnostics(stdout: &[u8], stderr: &[u8]) -> String {
    let mut diagnostics = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.trim().is_empty() {
        if !diagnostics.is_empty() {
            diagnostics.push('\n');
        }
        diagnostics.push_str(&err);
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> (tempfile::TempDir, LatexCache) {
        let dir = tempfile::tempdir().expect("temp cache dir");
        let cache = LatexCache::new(dir.path()).expect("open cache");
        (dir, cache)
    }

    #[test]
    fn identical_inputs_resolve_to_identical_paths() {
        let (_dir, cache) = cache();
        let a = cache.png_path("(a)", 10.0, 300, [0.0; 4]);
        let b = cache.png_path("(a)", 10.0, 300, [0.0; 4]);
        assert_eq!(a, b);
    }

    #[test]
    fn any_input_component_changes_the_path() {
        let (_dir, cache) = cache();
        let base = cache.png_path("(a)", 10.0, 300, [0.0; 4]);
        assert_ne!(base, cache.png_path("(b)", 10.0, 300, [0.0; 4]));
        assert_ne!(base, cache.png_path("(a)", 12.0, 300, [0.0; 4]));
        assert_ne!(base, cache.png_path("(a)", 10.0, 150, [0.0; 4]));
        assert_ne!(base, cache.png_path("(a)", 10.0, 300, [1.0, 0.0, 0.0, 0.0]));
        let other = cache.clone().with_preamble("\\usepackage{times}");
        assert_ne!(base, other.png_path("(a)", 10.0, 300, [0.0; 4]));
    }

    #[test]
    fn cache_hit_skips_the_toolchain() {
        // No pdflatex in the test environment; a pre-seeded entry must be
        // returned without spawning anything.
        let (_dir, cache) = cache();
        let path = cache.png_path("(a)", 10.0, 300, [0.0; 4]);
        fs::write(&path, b"png bytes").expect("seed cache entry");
        let resolved = cache.rasterize("(a)", 10.0, 300, [0.0; 4]).expect("hit");
        assert_eq!(resolved, path);
        assert_eq!(fs::read(&resolved).expect("read"), b"png bytes");
    }

    #[test]
    fn toolchain_failures_carry_the_offending_input() {
        let (_dir, cache) = cache();
        // Unbalanced macro: fails to compile wherever pdflatex exists, and
        // reports a missing compiler where it does not.
        let error = cache
            .rasterize("\\undefinedmacro{", 10.0, 300, [0.0; 4])
            .expect_err("cannot rasterize broken input");
        match error {
            LatexError::CompilerNotFound { program, input } => {
                assert_eq!(program, "pdflatex");
                assert_eq!(input, "\\undefinedmacro{");
            }
            LatexError::CompileFailed {
                input, diagnostics, ..
            } => {
                assert_eq!(input, "\\undefinedmacro{");
                assert!(!diagnostics.is_empty());
            }
            LatexError::Io(_) => {}
        }
    }

    #[test]
    fn tex_document_embeds_text_and_border() {
        let (_dir, cache) = cache();
        let texfile = cache
            .write_tex("(a)", 10.0, [1.0, 2.0, 3.0, 4.0])
            .expect("write tex");
        let document = fs::read_to_string(texfile).expect("read tex");
        assert!(document.contains("border={1pt 2pt 3pt 4pt}"));
        assert!(document.contains("(a)"));
        assert!(document.contains("\\fontsize{10}{12.5}"));
    }
}
