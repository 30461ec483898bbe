//! Test corpus management
//!
//! Real-world display profiles live under `testdata/profiles` at the
//! workspace root. The directory is optional; [`TestCorpus::synthetic`]
//! writes a generated corpus with the same layout for runs without it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{ProfileBuilder, formula_tag, table_tag};

/// A profile file from the corpus
#[derive(Debug, Clone)]
pub struct TestProfile {
    /// File stem
    pub name: String,
    /// Path to the profile file
    pub path: PathBuf,
}

impl TestProfile {
    pub fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).with_context(|| format!("Failed to read {}", self.path.display()))
    }
}

/// Profiles found under a testdata directory
pub struct TestCorpus {
    profiles: Vec<TestProfile>,
    base_path: PathBuf,
}

impl TestCorpus {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            profiles: Vec::new(),
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Corpus rooted at the workspace `testdata` directory
    pub fn workspace() -> Self {
        let base = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("testdata");
        Self::new(base)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Write a small set of generated display profiles under
    /// `base_path/profiles` and load them
    ///
    /// Covers a formula curve, 8-bit and 16-bit tables, and a profile
    /// without a vcgt tag. A non-profile file is included and ignored.
    pub fn synthetic(base_path: impl AsRef<Path>) -> Result<Self> {
        let mut corpus = Self::new(base_path);
        let dir = corpus.base_path.join("profiles");
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

        for (name, data) in synthetic_profiles() {
            let path = dir.join(name);
            std::fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        }
        std::fs::write(dir.join("README.txt"), "generated profiles\n")?;

        corpus.load()?;
        Ok(corpus)
    }

    /// Whether the profiles directory exists at all
    pub fn is_available(&self) -> bool {
        self.base_path.join("profiles").is_dir()
    }

    /// Collect every `.icc` / `.icm` file, sorted by name
    pub fn load(&mut self) -> Result<()> {
        let dir = self.base_path.join("profiles");
        if !dir.exists() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&dir).with_context(|| format!("Failed to list {}", dir.display()))? {
            let path = entry?.path();
            let is_profile = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("icc") || e.eq_ignore_ascii_case("icm"));
            if !is_profile {
                continue;
            }

            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.profiles.push(TestProfile { name, path });
        }
        self.profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(())
    }

    pub fn profiles(&self) -> &[TestProfile] {
        &self.profiles
    }

    pub fn get(&self, name: &str) -> Option<&TestProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// File names of [`TestCorpus::synthetic`] profiles
pub mod synthetic_names {
    pub const FORMULA: &str = "formula_gamma";
    pub const TABLE_8BIT: &str = "table_8bit";
    pub const TABLE_16BIT: &str = "table_16bit";
    pub const NO_VCGT: &str = "no_vcgt";
}

fn synthetic_profiles() -> Vec<(String, Vec<u8>)> {
    let ramp8: Vec<u16> = (0..256).collect();
    let ramp16: Vec<u16> = (0..1024u32).map(|i| (i * 65535 / 1023) as u16).collect();
    let dimmed: Vec<u16> = ramp16.iter().map(|&v| v - v / 8).collect();

    vec![
        (
            format!("{}.icc", synthetic_names::FORMULA),
            ProfileBuilder::new()
                .description("formula gamma")
                .vcgt(formula_tag([(1.0, 0.0, 1.0), (0.9, 0.0, 1.0), (1.1, 0.0, 1.0)]))
                .build(),
        ),
        (
            format!("{}.icc", synthetic_names::TABLE_8BIT),
            ProfileBuilder::new()
                .description("8-bit table")
                .vcgt(table_tag(1, &ramp8, &ramp8, &ramp8))
                .build(),
        ),
        (
            format!("{}.icm", synthetic_names::TABLE_16BIT),
            ProfileBuilder::new()
                .description("16-bit table")
                .vcgt(table_tag(2, &ramp16, &dimmed, &ramp16))
                .build(),
        ),
        (
            format!("{}.ICC", synthetic_names::NO_VCGT),
            ProfileBuilder::new().description("no calibration").build(),
        ),
    ]
}
