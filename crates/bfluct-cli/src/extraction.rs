use crate::error::{CliError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// One invocation of the external trajectory-extraction collaborator.
///
/// The tool converts a compressed trajectory plus topology into one structure
/// file per frame inside `output_dir`. The pipeline has no contract with it
/// beyond "produces N valid snapshot files of the expected format".
#[derive(Debug)]
pub struct ExtractionRequest<'a> {
    pub trajectory: &'a Path,
    pub topology: &'a Path,
    pub output_dir: &'a Path,
    /// Program plus leading arguments, whitespace-separated (e.g. "gmx trjconv").
    pub command: &'a str,
    /// Index group answer piped to the tool's interactive selection prompt.
    pub group: &'a str,
}

/// Runs the extraction tool and returns the number of snapshot files it
/// produced.
pub fn extract_frames(request: &ExtractionRequest) -> Result<usize> {
    let mut words = request.command.split_whitespace();
    let program = words.next().ok_or_else(|| {
        CliError::Config("extraction command must not be empty".to_string())
    })?;

    fs::create_dir_all(request.output_dir)?;
    let output_template = request.output_dir.join("frame.pdb");

    info!(
        command = request.command,
        trajectory = %request.trajectory.display(),
        "Invoking trajectory extraction."
    );

    let mut child = Command::new(program)
        .args(words)
        .arg("-f")
        .arg(request.trajectory)
        .arg("-s")
        .arg(request.topology)
        .arg("-o")
        .arg(&output_template)
        .arg("-sep")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            CliError::Extraction(format!("cannot launch '{}': {}", request.command, e))
        })?;

    // The tool prompts for an index group on stdin; answer and close the pipe
    // so it does not wait for more input. A tool that never reads stdin may
    // already have exited, so a broken pipe here is not an error.
    if let Some(mut stdin) = child.stdin.take() {
        let _ = writeln!(stdin, "{}", request.group);
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(CliError::Extraction(format!(
            "'{}' exited with {}",
            request.command, status
        )));
    }

    let frames = count_snapshot_files(request.output_dir)?;
    debug!(frames, "Extraction finished.");
    Ok(frames)
}

pub fn count_snapshot_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdb"))
        {
            count += 1;
        }
    }
    Ok(count)
}
