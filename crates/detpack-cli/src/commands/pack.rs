//! Pack command implementation.

use crate::cli::PackArgs;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use detpack_core::pack_blocking;
use detpack_core::pack_with_progress;
use tracing::debug;

pub fn execute(args: &PackArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let request = args.to_request();
    let output = request.output_path.clone();

    request
        .validate()
        .map_err(|e| convert_pack_error(e, &output))?;

    if output.exists() && !args.force {
        bail!(
            "Output file already exists: {}\n\
             HINT: Use --force to overwrite.",
            output.display()
        );
    }

    debug!(input = %request.input_dir.display(), output = %output.display(), "packing");

    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Packing");
        pack_with_progress(&request, &mut progress)
    } else {
        pack_blocking(&request)
    };
    let report = result.map_err(|e| convert_pack_error(e, &output))?;

    formatter.format_pack_result(&report)
}
