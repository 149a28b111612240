//! Plan command implementation

use crate::cli::PlanArgs;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;
use anyhow::Result;
use detpack_core::plan;

pub fn execute(args: &PlanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let request = args.source.to_request();
    let entries = plan(&request).map_err(|e| convert_pack_error(e, &request.output_path))?;

    formatter.format_plan(&request.output_path, &entries)
}
