//! Explicit home-folder layout.
//!
//! Folder roots are held in one value and passed to whatever needs them.
//! Nothing here reads ambient process-wide state at use time, which keeps
//! path resolution testable and reentrant; [`HomeLayout::from_home_dir`]
//! is the only place the user's home directory is consulted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root folders for the toolkit and the two external simulation codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeLayout {
    /// Toolkit home; input data lives under `Data/`.
    pub toolkit_home: PathBuf,
    /// Dust-code installation; model output lands under `<subdir>/models`.
    pub dust_home: PathBuf,
    /// Gas-code installation; telescope specs live under `src/data`.
    pub gas_home: PathBuf,
}

impl HomeLayout {
    pub fn new(
        toolkit_home: impl Into<PathBuf>,
        dust_home: impl Into<PathBuf>,
        gas_home: impl Into<PathBuf>,
    ) -> Self {
        HomeLayout {
            toolkit_home: toolkit_home.into(),
            dust_home: dust_home.into(),
            gas_home: gas_home.into(),
        }
    }

    /// Conventional layout under the user's home directory: `~/Outflow`,
    /// `~/DustRT`, `~/GasRT`. Returns None when the home directory cannot
    /// be determined.
    pub fn from_home_dir() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(HomeLayout {
            toolkit_home: home.join("Outflow"),
            dust_home: home.join("DustRT"),
            gas_home: home.join("GasRT"),
        })
    }

    /// The toolkit's input-data folder.
    pub fn data_dir(&self) -> PathBuf {
        self.toolkit_home.join("Data")
    }

    /// Join a resolved relative path under the toolkit home.
    pub fn toolkit_path(&self, relative: &str) -> PathBuf {
        self.toolkit_home.join(relative)
    }

    /// The dust code's model-output folder for one path-mapping subdir.
    pub fn dust_models_dir(&self, subdir: &str) -> PathBuf {
        self.dust_home.join(subdir).join("models")
    }

    /// The gas code's spec file for one telescope.
    pub fn telescope_spec_file(&self, telescope: &str) -> PathBuf {
        self.gas_home
            .join("src")
            .join("data")
            .join(format!("{telescope}.spec"))
    }
}
