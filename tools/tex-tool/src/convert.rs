//! Conversion orchestration
//!
//! One file at a time: read fully, convert in memory, then write. A failure
//! on one file is recorded and the batch moves on.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tex_common::fs::{DEFAULT_MAX_INPUT_BYTES, read_file_with_limit};
use tex_common::{TEX_EXTENSION, TexContainer, format_sidecar, parse_sidecar, sidecar_path};

use crate::config::ConvertConfig;
use crate::error::ConvertError;
use crate::image_codec;
use crate::output::OutputNamer;
use crate::registry;

/// Which way a file is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// TEX container → PNG (+ sidecar)
    Decode,
    /// Image → TEX container
    Encode,
}

impl Direction {
    /// `.tex` (any case) decodes; everything else encodes
    pub fn for_path(path: &Path) -> Self {
        let is_tex = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TEX_EXTENSION));
        if is_tex {
            Direction::Decode
        } else {
            Direction::Encode
        }
    }
}

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Write outputs here instead of next to each input
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub uv_sidecars: bool,
    pub max_input_bytes: u64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            overwrite: false,
            uv_sidecars: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            overwrite: config.overwrite,
            uv_sidecars: config.uv_sidecars,
            max_input_bytes: config.max_input_bytes,
        }
    }
}

/// Files written for one converted input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub output: PathBuf,
    pub sidecar: Option<PathBuf>,
}

/// Result of processing one input
#[derive(Debug)]
pub enum Outcome {
    Converted(Converted),
    /// Not a file we convert (bad TEX tag, unrecognized image)
    Skipped(ConvertError),
    Failed(ConvertError),
}

impl Outcome {
    fn from_result(result: Result<Converted, ConvertError>) -> Self {
        match result {
            Ok(converted) => Outcome::Converted(converted),
            Err(e) if e.is_skip() => Outcome::Skipped(e),
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// Per-file outcomes of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<(PathBuf, Outcome)>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Converted(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Convert every input in order; never stops early
pub fn convert_batch(inputs: &[PathBuf], options: &ConvertOptions) -> BatchReport {
    let mut report = BatchReport::default();
    for input in inputs {
        let outcome = process_file(input, options);
        report.outcomes.push((input.clone(), outcome));
    }
    report
}

/// Convert one input and log the outcome
pub fn process_file(input: &Path, options: &ConvertOptions) -> Outcome {
    let outcome = Outcome::from_result(convert_file(input, options));
    match &outcome {
        Outcome::Converted(converted) => match &converted.sidecar {
            Some(sidecar) => tracing::info!(
                "Converted {:?} -> {:?} (+ {:?})",
                input,
                converted.output,
                sidecar
            ),
            None => tracing::info!("Converted {:?} -> {:?}", input, converted.output),
        },
        Outcome::Skipped(e) => tracing::warn!("Skipping {:?}: {}", input, e),
        Outcome::Failed(e) => tracing::error!("Failed to convert {:?} ({}): {}", input, e.kind(), e),
    }
    outcome
}

/// Convert one input in the direction its extension implies
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<Converted, ConvertError> {
    match Direction::for_path(input) {
        Direction::Decode => tex_to_png(input, options),
        Direction::Encode => image_to_tex(input, options),
    }
}

/// Read and parse a TEX file without converting it
pub fn inspect(input: &Path, max_input_bytes: u64) -> Result<TexContainer, ConvertError> {
    let bytes = read_file_with_limit(input, max_input_bytes).map_err(ConvertError::Read)?;
    Ok(TexContainer::decode(&bytes)?)
}

fn tex_to_png(input: &Path, options: &ConvertOptions) -> Result<Converted, ConvertError> {
    let container = inspect(input, options.max_input_bytes)?;
    tracing::debug!(
        "{:?}: version {}, {}x{}, {}, {} rects, {} byte payload",
        input,
        container.version,
        container.width,
        container.height,
        container.format,
        container.uv_rects.len(),
        container.payload.len()
    );

    let image = registry::decode(
        &container.payload,
        container.width,
        container.height,
        container.format.code(),
    )?;
    if (image.width(), image.height()) != (container.width, container.height) {
        tracing::warn!(
            "{:?}: header says {}x{} but payload is {}x{}",
            input,
            container.width,
            container.height,
            image.width(),
            image.height()
        );
    }

    let png = image_codec::encode_png(&image)?;
    let sidecar_text = (options.uv_sidecars && !container.uv_rects.is_empty())
        .then(|| format_sidecar(&container.uv_rects));

    let desired = output_path(input, "png", options)?;
    let output = OutputNamer::new(options.overwrite).resolve(&desired);
    write_output(&output, &png)?;

    let sidecar = match sidecar_text {
        Some(text) => {
            let path = sidecar_path(&output);
            if let Err(e) = std::fs::write(&path, text) {
                // Keep the pair consistent: no image without its rects
                if let Err(remove_err) = std::fs::remove_file(&output) {
                    tracing::warn!(
                        "Could not remove {:?} after sidecar write failed: {}",
                        output,
                        remove_err
                    );
                }
                return Err(ConvertError::io(path, e));
            }
            Some(path)
        }
        None => {
            if options.overwrite && options.uv_sidecars {
                remove_stale_sidecar(&output);
            }
            None
        }
    };

    Ok(Converted { output, sidecar })
}

fn image_to_tex(input: &Path, options: &ConvertOptions) -> Result<Converted, ConvertError> {
    let bytes = read_file_with_limit(input, options.max_input_bytes).map_err(ConvertError::Read)?;
    let hint = input
        .extension()
        .and_then(OsStr::to_str)
        .and_then(image_codec::format_hint);
    let image = image_codec::decode(&bytes, hint)?;

    let uv_rects = if options.uv_sidecars {
        read_sidecar(input)?
    } else {
        Vec::new()
    };

    let (format, payload) = registry::encode(&image)?;
    let mut container = TexContainer::argb32(image.width(), image.height(), payload, uv_rects);
    container.format = format;
    tracing::debug!(
        "{:?}: writing version {} with {} rects",
        input,
        container.version,
        container.uv_rects.len()
    );

    let desired = output_path(input, TEX_EXTENSION, options)?;
    let output = OutputNamer::new(options.overwrite).resolve(&desired);
    write_output(&output, &container.encode())?;

    Ok(Converted {
        output,
        sidecar: None,
    })
}

/// Drop a sidecar left over from an earlier output at `image_path`, so a later
/// encode does not pick up rects this image never had
fn remove_stale_sidecar(image_path: &Path) {
    let path = sidecar_path(image_path);
    if !path.is_file() {
        return;
    }
    match std::fs::remove_file(&path) {
        Ok(()) => tracing::debug!("Removed stale sidecar {:?}", path),
        Err(e) => tracing::warn!("Could not remove stale sidecar {:?}: {}", path, e),
    }
}

/// Rects from the sidecar next to `image_path`; empty if there is none
fn read_sidecar(image_path: &Path) -> Result<Vec<tex_common::Rect>, ConvertError> {
    let path = sidecar_path(image_path);
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| ConvertError::io(&path, e))?;
    Ok(parse_sidecar(&text))
}

/// `<output dir or input dir>/<input stem>.<extension>`, creating the output dir
fn output_path(
    input: &Path,
    extension: &str,
    options: &ConvertOptions,
) -> Result<PathBuf, ConvertError> {
    let dir = match &options.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))?;
            dir.clone()
        }
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("texture"));
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(extension);
    Ok(dir.join(name))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    std::fs::write(path, bytes).map_err(|e| ConvertError::io(path, e))
}
