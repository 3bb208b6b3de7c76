use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `adtrail clear` command.
///
/// Deletes every log on the server. Asks for confirmation unless `yes`
/// is set; declining leaves the server untouched.
pub fn execute(ctx: &Context, yes: bool) -> Result<()> {
    output::header("adtrail clear");

    if !yes {
        output::warning("This deletes ALL audit logs on the server and cannot be undone.");
        if !output::confirm("Delete all logs?")? {
            output::warning("Cancelled, nothing was deleted");
            return Ok(());
        }
    }

    let sp = output::spinner("Deleting logs...");
    match ctx.transport.delete_all_logs() {
        Ok(()) => {
            output::finish_spinner(sp, "All audit logs deleted");
            Ok(())
        }
        Err(e) => {
            sp.finish_and_clear();
            Err(e)
        }
    }
}
