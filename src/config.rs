use std::path::PathBuf;

/// Which geometry formats to write for each map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Formats {
    pub vmf: bool,
    pub vmap: bool,
}

impl Formats {
    pub const BOTH: Self = Self {
        vmf: true,
        vmap: true,
    };
}

impl Default for Formats {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Settings for one conversion run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Everything is written under `<output_root>/<addon_name>`.
    pub output_root: PathBuf,
    pub addon_name: String,
    /// WAD2 archives, searched in order.
    pub archives: Vec<PathBuf>,
    /// Pre-extracted rasters named `<canonical id>.<raster_extension>`, searched before the
    /// archives.
    pub texture_dir: Option<PathBuf>,
    pub formats: Formats,
    pub raster_extension: String,
    /// Re-extract rasters that already exist.
    pub overwrite_rasters: bool,
    /// Keep the raster after a texture compiler has turned it into something else.
    pub keep_rasters: bool,
}

impl Config {
    pub const DEFAULT_OUTPUT_ROOT: &'static str = "alyx_output";
    pub const DEFAULT_ADDON_NAME: &'static str = "quakeautomatedscriptport";
    pub const DEFAULT_RASTER_EXTENSION: &'static str = "png";

    /// `<output_root>/<addon_name>`.
    pub fn addon_dir(&self) -> PathBuf {
        self.output_root.join(&self.addon_name)
    }

    /// Where `.vmf` and `.vmap` files go.
    pub fn maps_dir(&self) -> PathBuf {
        self.addon_dir().join("maps")
    }

    /// Where rasters and materials go.
    pub fn materials_dir(&self) -> PathBuf {
        self.addon_dir().join("materials")
    }

    /// The raster file name for a texture.
    pub fn raster_file_name(&self, canonical_id: &str) -> String {
        format!("{}.{}", canonical_id, self.raster_extension)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(Self::DEFAULT_OUTPUT_ROOT),
            addon_name: Self::DEFAULT_ADDON_NAME.to_string(),
            archives: Vec::new(),
            texture_dir: None,
            formats: Formats::default(),
            raster_extension: Self::DEFAULT_RASTER_EXTENSION.to_string(),
            overwrite_rasters: false,
            keep_rasters: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn layout() {
        let config = Config::default();

        assert_eq!(
            config.maps_dir(),
            Path::new("alyx_output/quakeautomatedscriptport/maps")
        );
        assert_eq!(
            config.materials_dir(),
            Path::new("alyx_output/quakeautomatedscriptport/materials")
        );
        assert_eq!(config.raster_file_name("_grate"), "_grate.png");
        assert_eq!(config.formats, Formats::BOTH);
        assert!(!config.overwrite_rasters);
        assert!(config.keep_rasters);
    }
}
