//! Program build configuration.

use std::collections::HashSet;
use std::ffi::CString;
use std::fs;
use std::path::PathBuf;

use crate::error::Result as OclResult;
use crate::functions::{self, ApiWrapperError};
use crate::util;
use crate::{Context, DeviceId, Program};

/// A build option used by `ProgramBuilder`.
///
/// Compiler options (`Cmplr...`) end up in the option string handed to
/// `clBuildProgram`. Include options (`Include...`) are text prepended
/// (or, for `IncludeRawEof`, appended) to the program source.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildOpt {
    CmplrDefine { ident: String, val: String },
    CmplrInclDir { path: String },
    CmplrOther(String),
    IncludeDefine { ident: String, val: String },
    IncludeRaw(String),
    IncludeRawEof(String),
}

impl BuildOpt {
    /// Returns a `BuildOpt::CmplrDefine`.
    pub fn cmplr_def<S: Into<String>>(ident: S, val: i32) -> BuildOpt {
        BuildOpt::CmplrDefine {
            ident: ident.into(),
            val: val.to_string(),
        }
    }

    /// Returns a `BuildOpt::IncludeDefine`.
    pub fn include_def<S: Into<String>, V: Into<String>>(ident: S, val: V) -> BuildOpt {
        BuildOpt::IncludeDefine {
            ident: ident.into(),
            val: val.into(),
        }
    }
}

/// A builder for `Program`.
///
/// Either source (text and/or files) or binaries may be used, not both.
#[must_use = "builders do nothing unless '::build' is called"]
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    options: Vec<BuildOpt>,
    src_files: Vec<PathBuf>,
    binaries: Option<Vec<Vec<u8>>>,
    devices: Option<Vec<DeviceId>>,
}

impl ProgramBuilder {
    /// Returns a new, empty, build configuration object.
    pub fn new() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    /// Adds a build option containing a compiler command line definition.
    /// Formatted as `-D {name}={val}`.
    ///
    /// ## Example
    ///
    /// `...cmplr_def("MAX_ITERS", 500)...`
    ///
    pub fn cmplr_def<S: Into<String>>(&mut self, name: S, val: i32) -> &mut ProgramBuilder {
        self.options.push(BuildOpt::cmplr_def(name, val));
        self
    }

    /// Adds a build option containing a raw compiler command line parameter.
    /// Formatted as `{}` (exact text).
    ///
    /// ## Example
    ///
    /// `...cmplr_opt("-cl-fast-relaxed-math")...`
    ///
    pub fn cmplr_opt<S: Into<String>>(&mut self, co: S) -> &mut ProgramBuilder {
        self.options.push(BuildOpt::CmplrOther(co.into()));
        self
    }

    /// Pushes pre-created build option to the list of options.
    pub fn bo(&mut self, bo: BuildOpt) -> &mut ProgramBuilder {
        self.options.push(bo);
        self
    }

    /// Adds the contents of a file to the program source.
    ///
    /// The file is read by `::build`. A path added more than once is only
    /// included once.
    pub fn source_file<P: Into<PathBuf>>(&mut self, file_path: P) -> &mut ProgramBuilder {
        self.src_files.push(file_path.into());
        self
    }

    /// Adds raw text to the end of the program source.
    pub fn source<S: Into<String>>(&mut self, src: S) -> &mut ProgramBuilder {
        self.options.push(BuildOpt::IncludeRawEof(src.into()));
        self
    }

    /// Sets the binaries to be loaded, one for each device listed in
    /// `::devices`, in the same order.
    pub fn binaries(&mut self, bins: &[&[u8]]) -> &mut ProgramBuilder {
        self.binaries = Some(bins.iter().map(|bin| bin.to_vec()).collect());
        self
    }

    /// Specifies a list of devices to build this program on. The devices must
    /// be associated with the context passed to `::build`.
    ///
    /// When unset, source programs are built for every device in the
    /// context.
    pub fn devices(&mut self, devices: &[DeviceId]) -> &mut ProgramBuilder {
        self.devices = Some(devices.to_vec());
        self
    }

    /// Returns the devices specified, if any.
    pub fn get_devices(&self) -> Option<&[DeviceId]> {
        self.devices.as_ref().map(|d| &d[..])
    }

    /// Returns a concatenated string of command line options to be passed to
    /// the compiler when building this program.
    pub fn get_compiler_options(&self) -> OclResult<CString> {
        let opts: Vec<String> = self.options.iter().filter_map(|option| match *option {
            BuildOpt::CmplrDefine { ref ident, ref val } => Some(format!("-D {}={}", ident, val)),
            BuildOpt::CmplrInclDir { ref path } => Some(format!("-I {}", path)),
            BuildOpt::CmplrOther(ref s) => Some(s.clone()),
            _ => None,
        }).collect();

        Ok(CString::new(opts.join(" "))?)
    }

    /// Returns the final program source text.
    ///
    /// ### Order of Inclusion
    ///
    /// 1. Macro definitions and code strings specified by a
    ///    `BuildOpt::IncludeDefine` or `BuildOpt::IncludeRaw` via `::bo`
    /// 2. Contents of files specified via `::source_file`
    /// 3. Contents of strings specified via `::source` or a
    ///    `BuildOpt::IncludeRawEof` via `::bo`
    ///
    /// Each piece starts on a new line.
    pub fn get_source(&self) -> OclResult<String> {
        let mut src = String::new();

        for option in &self.options {
            match *option {
                BuildOpt::IncludeDefine { ref ident, ref val } => {
                    push_piece(&mut src, &format!("#define {}  {}", ident, val))
                }
                BuildOpt::IncludeRaw(ref text) => push_piece(&mut src, text),
                _ => (),
            }
        }

        let mut src_file_history: HashSet<&PathBuf> = HashSet::with_capacity(self.src_files.len());

        for src_path in &self.src_files {
            if !src_file_history.insert(src_path) { continue; }
            push_piece(&mut src, &fs::read_to_string(src_path)?);
        }

        for option in &self.options {
            if let BuildOpt::IncludeRawEof(ref text) = *option {
                push_piece(&mut src, text);
            }
        }

        Ok(src)
    }

    /// Returns the final program source as a list of strings, one per line.
    pub fn get_src_strings(&self) -> OclResult<Vec<CString>> {
        Ok(util::source_lines(&self.get_source()?)?)
    }

    fn has_source(&self) -> bool {
        !self.src_files.is_empty() || self.options.iter().any(|opt| match *opt {
            BuildOpt::IncludeRawEof(_) => true,
            _ => false,
        })
    }

    /// Creates and builds the program.
    pub fn build(&self, context: Context) -> OclResult<Program> {
        let cmplr_opts = self.get_compiler_options()?;

        match self.binaries {
            Some(ref bins) => {
                if self.has_source() {
                    return Err(ApiWrapperError::ProgramBuilderSourceAndBinaries.into());
                }
                let bins: Vec<&[u8]> = bins.iter().map(|bin| &bin[..]).collect();
                let devices = self.get_devices().unwrap_or(&[]);
                let program = functions::create_program_with_binary(context, devices, &bins)?;
                functions::build_program(&program, Some(devices), &cmplr_opts)?;
                Ok(program)
            }
            None => {
                if !self.has_source() {
                    return Err(ApiWrapperError::ProgramBuilderNoSource.into());
                }
                functions::create_build_program(context, &self.get_src_strings()?,
                    self.get_devices(), &cmplr_opts)
            }
        }
    }
}

/// Appends `piece` to `src`, terminating it with a line break.
fn push_piece(src: &mut String, piece: &str) {
    src.push_str(piece);
    if !piece.ends_with('\n') {
        src.push('\n');
    }
}
