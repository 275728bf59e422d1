//! Batch conversion.
//!
//! Every map is converted first, then every texture the maps use. A failure costs only the map
//! or texture it happened to; it is reported and the run moves on.
//!
//! ```no_run
//! use qmap_convert::config::Config;
//! use qmap_convert::convert::Converter;
//! use qmap_convert::report::TracingReporter;
//!
//! let config = Config {
//!     archives: vec!["id1/gfx/base.wad".into()],
//!     ..Config::default()
//! };
//! let mut reporter = TracingReporter;
//! let summary = Converter::new(config, &mut reporter).run(&["e1m1.map"], &mut reporter);
//! println!("{}", summary);
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{MipTexture, TextureName};
use crate::config::Config;
use crate::emit::{material, vmap, vmf};
use crate::error::{Error, ErrorKind, Result};
use crate::map::Map;
use crate::report::{Diagnostic, Reporter, Tally};
use crate::wad::WadStack;

/// Somewhere to find rasters that were extracted ahead of time.
pub trait TextureSource {
    /// Returns the raster for `canonical_id`, if this source has one.
    fn find(&self, canonical_id: &str) -> Option<PathBuf>;
}

impl<F: Fn(&str) -> Option<PathBuf>> TextureSource for F {
    fn find(&self, canonical_id: &str) -> Option<PathBuf> {
        self(canonical_id)
    }
}

/// Looks for `<dir>/<canonical id>.<extension>`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
    extension: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }
}

impl TextureSource for DirectorySource {
    fn find(&self, canonical_id: &str) -> Option<PathBuf> {
        let path = self
            .dir
            .join(format!("{}.{}", canonical_id, self.extension));
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }
}

/// Turns a raster into the engine's compiled texture format.
///
/// Implemented for closures taking `(canonical_id, raster, is_transparent)`.
pub trait TextureCompiler {
    /// Compiles `raster` and returns the path of the compiled asset, or a description of what went
    /// wrong.
    fn compile(
        &mut self,
        canonical_id: &str,
        raster: &Path,
        is_transparent: bool,
    ) -> std::result::Result<PathBuf, String>;
}

impl<F> TextureCompiler for F
where
    F: FnMut(&str, &Path, bool) -> std::result::Result<PathBuf, String>,
{
    fn compile(
        &mut self,
        canonical_id: &str,
        raster: &Path,
        is_transparent: bool,
    ) -> std::result::Result<PathBuf, String> {
        self(canonical_id, raster, is_transparent)
    }
}

/// What a [`Converter::run`] got done.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub maps_converted: usize,
    /// Maps that parsed but had no brushes. Nothing is written for them.
    pub maps_empty: usize,
    pub maps_failed: usize,
    pub textures_converted: usize,
    /// Textures no source had, sorted.
    pub textures_missing: Vec<String>,
    pub textures_failed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    /// Returns true if every map and texture converted.
    pub fn is_clean(&self) -> bool {
        self.maps_failed == 0 && self.textures_missing.is_empty() && self.textures_failed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "maps: {} converted, {} empty, {} failed; textures: {} converted, {} missing, {} failed; {} warnings, {} errors",
            self.maps_converted,
            self.maps_empty,
            self.maps_failed,
            self.textures_converted,
            self.textures_missing.len(),
            self.textures_failed,
            self.warnings,
            self.errors,
        )?;
        if !self.textures_missing.is_empty() {
            write!(fmt, "\nmissing textures: {}", self.textures_missing.join(", "))?;
        }
        Ok(())
    }
}

/// Converts maps and their textures according to a [`Config`].
pub struct Converter<'a> {
    config: Config,
    wads: WadStack,
    sources: Vec<Box<dyn TextureSource + 'a>>,
    compiler: Option<Box<dyn TextureCompiler + 'a>>,
}

impl<'a> Converter<'a> {
    /// Opens the configured archives up front. Archives that fail to open are reported and left
    /// out of every lookup.
    pub fn new(config: Config, reporter: &mut dyn Reporter) -> Self {
        let wads = WadStack::open(&config.archives, reporter);

        let mut sources: Vec<Box<dyn TextureSource + 'a>> = Vec::new();
        if let Some(dir) = &config.texture_dir {
            sources.push(Box::new(DirectorySource::new(
                dir,
                &config.raster_extension,
            )));
        }

        Self {
            config,
            wads,
            sources,
            compiler: None,
        }
    }

    /// Adds a source of pre-extracted rasters, consulted after the ones already added and before
    /// the archives.
    pub fn with_source(mut self, source: impl TextureSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Sets the compiler run on every raster.
    pub fn with_compiler(mut self, compiler: impl TextureCompiler + 'a) -> Self {
        self.compiler = Some(Box::new(compiler));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn wads(&self) -> &WadStack {
        &self.wads
    }

    /// Converts each map, then each texture they reference. Never stops early.
    pub fn run<P: AsRef<Path>>(
        &mut self,
        maps: impl IntoIterator<Item = P>,
        reporter: &mut dyn Reporter,
    ) -> Summary {
        let mut reporter = Tally::new(reporter);
        let mut summary = Summary::default();
        let mut textures = BTreeSet::new();

        for path in maps {
            let path = path.as_ref();
            let map = match Map::load(path, &mut reporter) {
                Ok(map) => map,
                Err(err) => {
                    map_failed(path, err.into(), &mut summary, &mut reporter);
                    continue;
                }
            };

            // Textures are converted even if writing this map's geometry fails.
            textures.extend(map.textures().iter().cloned());

            match self.write_map(path, &map, &mut reporter) {
                Ok(true) => summary.maps_converted += 1,
                Ok(false) => summary.maps_empty += 1,
                Err(err) => map_failed(path, err, &mut summary, &mut reporter),
            }
        }

        let mut done = HashSet::new();
        for texture in &textures {
            let name = TextureName::classify(texture);
            if !done.insert(name.canonical_id().to_string()) {
                reporter.report(
                    Diagnostic::info(format!("shares material {} with another texture", name))
                        .with_texture(texture.as_str()),
                );
                continue;
            }

            match self.convert_texture(texture, &mut reporter) {
                Ok(()) => summary.textures_converted += 1,
                Err(err) => {
                    let mut diagnostic =
                        Diagnostic::warning(err.to_string()).with_texture(texture.as_str());
                    diagnostic.path = err.path().map(Path::to_owned);
                    reporter.report(diagnostic);

                    if err.kind() == ErrorKind::LookupMiss {
                        summary.textures_missing.push(texture.clone());
                    } else {
                        summary.textures_failed += 1;
                    }
                }
            }
        }

        summary.warnings = reporter.warnings();
        summary.errors = reporter.errors();
        summary
    }

    /// Writes the geometry files for a map loaded from `path`. Returns `Ok(false)` without
    /// writing anything if the map has no brushes.
    pub fn write_map(&self, path: &Path, map: &Map, reporter: &mut dyn Reporter) -> Result<bool> {
        if map.is_empty() {
            reporter.report(
                Diagnostic::warning("no brushes found; nothing written").with_path(path),
            );
            return Ok(false);
        }

        let maps_dir = self.config.maps_dir();
        fs::create_dir_all(&maps_dir).map_err(|err| Error::write_failed(&maps_dir, err))?;

        let stem = path
            .file_stem()
            .unwrap_or_else(|| path.as_os_str())
            .to_string_lossy();

        if self.config.formats.vmf {
            let out = maps_dir.join(format!("{}.vmf", stem));
            write(&out, vmf::emit(map), reporter)?;
        }
        if self.config.formats.vmap {
            let out = maps_dir.join(format!("{}.vmap", stem));
            write(&out, vmap::emit(map), reporter)?;
        }

        Ok(true)
    }

    /// Gets a raster for one texture, compiles it if there's a compiler, and writes its material.
    ///
    /// # Errors
    ///
    /// [`Error::LookupMiss`] if no source or archive has the texture, in which case no material
    /// is written.
    pub fn convert_texture(&mut self, texture: &str, reporter: &mut dyn Reporter) -> Result<()> {
        let name = TextureName::classify(texture);
        let id = name.canonical_id();

        let materials_dir = self.config.materials_dir();
        fs::create_dir_all(&materials_dir)
            .map_err(|err| Error::write_failed(&materials_dir, err))?;

        let raster = materials_dir.join(self.config.raster_file_name(id));
        if raster.exists() && !self.config.overwrite_rasters {
            reporter.report(
                Diagnostic::info("reusing existing raster")
                    .with_path(&raster)
                    .with_texture(texture),
            );
        } else {
            self.fetch_raster(texture, id, &raster, reporter)?;
        }

        if let Some(compiler) = &mut self.compiler {
            match compiler.compile(id, &raster, name.is_transparent()) {
                Ok(compiled) => {
                    reporter.report(
                        Diagnostic::info("compiled texture")
                            .with_path(&compiled)
                            .with_texture(texture),
                    );
                    if !self.config.keep_rasters {
                        if let Err(err) = fs::remove_file(&raster) {
                            reporter.report(
                                Diagnostic::warning(format!("can't remove raster: {}", err))
                                    .with_path(&raster)
                                    .with_texture(texture),
                            );
                        }
                    }
                }
                Err(desc) => reporter.report(
                    Diagnostic::warning(format!("texture compiler failed: {}", desc))
                        .with_path(&raster)
                        .with_texture(texture),
                ),
            }
        }

        let text = material::emit(id, name.is_transparent(), &self.config.raster_extension);
        write(&materials_dir.join(material::file_name(id)), text, reporter)
    }

    /// Puts the raster for `texture` at `raster`, from a texture source if one has it or else
    /// from the archives.
    fn fetch_raster(
        &self,
        texture: &str,
        id: &str,
        raster: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<()> {
        for source in &self.sources {
            if let Some(found) = source.find(id) {
                if found != raster {
                    fs::copy(&found, raster).map_err(|err| Error::write_failed(raster, err))?;
                }
                reporter.report(
                    Diagnostic::info("using pre-extracted raster")
                        .with_path(&found)
                        .with_texture(texture),
                );
                return Ok(());
            }
        }

        let image = MipTexture::find_and_decode(&self.wads, texture, reporter).ok_or_else(|| {
            Error::LookupMiss {
                texture: texture.to_string(),
            }
        })?;
        image
            .save(raster)
            .map_err(|err| Error::write_failed(raster, err))?;

        reporter.report(
            Diagnostic::info(format!("extracted {}x{} raster", image.width(), image.height()))
                .with_path(raster)
                .with_texture(texture),
        );
        Ok(())
    }
}

fn map_failed(path: &Path, err: Error, summary: &mut Summary, reporter: &mut dyn Reporter) {
    reporter.report(Diagnostic::error(err.to_string()).with_path(path));
    summary.maps_failed += 1;
}

fn write(path: &Path, text: String, reporter: &mut dyn Reporter) -> Result<()> {
    fs::write(path, text).map_err(|err| Error::write_failed(path, err))?;
    reporter.report(Diagnostic::info("wrote file").with_path(path));
    Ok(())
}
