//! HTTP-client egress decoration.

use gray_core::{context, VERSION_GRAY, VERSION_HEADER};

/// Attach the gray header to an outbound request when the current request
/// scope is gray-tagged.
///
/// Base-tagged scopes (and code outside any scope) send nothing: absence
/// of the header is the downstream default, and the common path stays free
/// of extra header overhead.
pub fn inject_gray_tag(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if context::current_tag().is_gray() {
        builder.header(VERSION_HEADER, VERSION_GRAY)
    } else {
        builder
    }
}
