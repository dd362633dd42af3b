//! Stored login management.

use anyhow::Result;

use atelier_auth::{Role, Session};

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionCommand::Set { name, role, token } => {
            let session = Session::new(name, Role::new(role), token)?;
            ctx.config.save_session(&session)?;
            ctx.output.success(&format!(
                "Session stored at {}",
                ctx.config.session_path.display()
            ));
            Ok(())
        }
        SessionCommand::Show => {
            let session = ctx.config.load_session()?;
            if ctx.output.is_json() {
                // The token never leaves the session file.
                ctx.output.json(&serde_json::json!({
                    "name": session.name,
                    "role": session.role,
                    "admin": session.is_admin(),
                }));
                return Ok(());
            }
            ctx.output.header("Session");
            ctx.output.kv("Name", &session.name);
            ctx.output.kv("Role", session.role.as_str());
            ctx.output
                .kv("Can delete sales", if session.is_admin() { "yes" } else { "no" });
            Ok(())
        }
        SessionCommand::Clear => {
            if ctx.config.clear_session()? {
                ctx.output.success("Session cleared");
            } else {
                ctx.output.info("No stored session");
            }
            Ok(())
        }
    }
}
