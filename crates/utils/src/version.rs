use std::sync::LazyLock;

use crate::build_info::BuildInfo;
use crate::build_info::BUILD_INFO;

const SHORT_SHA_LEN: usize = 8;

/// Version shown by `--version` and in startup logs:
/// `<image version>-<short commit>[-dirty]`.
pub static VERSION: LazyLock<String> =
    LazyLock::new(|| render(env!("IMAGE_VERSION"), &BUILD_INFO));

fn render(image_version: &str, build: &BuildInfo) -> String {
    let commit = build
        .commit_sha1
        .map(|sha| sha.get(..SHORT_SHA_LEN).unwrap_or(sha))
        .unwrap_or("unknown");
    let dirty = if build.git_dirty { "-dirty" } else { "" };
    format!("{image_version}-{commit}{dirty}")
}
