//! The render-and-exec run.
//!
//! A run is strictly linear: validate every value, render nginx.conf,
//! render nginx.lua, then hand off to nginx. The first error ends the run;
//! nothing is retried or rolled back. If the second render or the handoff
//! fails, files already written stay on disk.

use crate::error::Result;
use crate::fields::{Registry, Values};
use crate::handoff::{Handoff, Launch};
use crate::layout::Layout;
use crate::render::render;
use crate::validate::validate;
use std::convert::Infallible;

/// Validate, render both targets, and launch nginx.
///
/// Returns only on failure; a successful launch replaces the process.
pub fn run(
    registry: &Registry,
    values: &Values,
    layout: &Layout,
    launcher: &mut dyn Launch,
) -> Result<Infallible> {
    validate(registry, values)?;
    log::debug!("{} values validated", registry.len());

    for target in layout.targets() {
        render(registry, values, &target.template, &target.output)?;
    }

    let handoff = Handoff::inheriting_env(&layout.nginx_binary, layout.nginx_args());
    log::info!("exec {}", handoff.command_line());
    launcher.launch(&handoff)
}
