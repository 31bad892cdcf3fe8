//! Message layout - builds the blocks posted for a build step

use crate::core::models::{Block, BuildInfo, EvaluationInput, TextObject};

/// Line linking back to the build, styled by outcome
#[must_use]
pub fn build_line(build: &BuildInfo, failed: bool) -> String {
    let summary = format!(
        "<{}|{}/{}: Build {}>",
        build.build_url, build.organization_slug, build.pipeline_name, build.build_number
    );

    if failed {
        format!(
            "*<{}#{}|:point_right: View logs :point_left:>* {summary} :red_circle:",
            build.build_url, build.job_id
        )
    } else {
        format!("{summary} :large_green_circle:")
    }
}

/// Compose the blocks for a notification
///
/// The layout is the message text, a divider, then a context line linking
/// to the build. Failed steps also get a link to the job log.
#[must_use]
pub fn compose_blocks(text: &str, build: &BuildInfo, input: &EvaluationInput) -> Vec<Block> {
    let failed = !input.succeeded();
    vec![
        Block::Section {
            text: TextObject::mrkdwn(text),
        },
        Block::Divider,
        Block::Context {
            elements: vec![TextObject::mrkdwn(build_line(build, failed))],
        },
    ]
}
