//! Header injection for generated artifacts.

use crate::error::SnapshotError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// License block written at the top of every artifact unless configured otherwise.
pub const DEFAULT_HEADER: &str = r#"/*
Licensed to the Apache Software Foundation (ASF) under one or more
contributor license agreements.  See the NOTICE file distributed with
this work for additional information regarding copyright ownership.
The ASF licenses this file to You under the Apache License, Version 2.0
(the "License"); you may not use this file except in compliance with
the License.  You may obtain a copy of the License at

   http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

"#;

/// Access mode of the rewritten artifact.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o777;

/// Prepend `header` to the file at `path` and rewrite it in place.
///
/// Must run after the serializer has finished writing. A failure while
/// rewriting can leave the file in its header-less state.
pub fn prepend_header(path: &Path, header: &str) -> Result<(), SnapshotError> {
    let post_process = |source| SnapshotError::PostProcess {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(post_process)?;

    let mut final_content = Vec::with_capacity(header.len() + content.len());
    final_content.extend_from_slice(header.as_bytes());
    final_content.extend_from_slice(&content);

    fs::write(path, &final_content).map_err(post_process)?;
    set_artifact_mode(path).map_err(post_process)?;

    debug!(
        path = %path.display(),
        header_bytes = header.len(),
        "Prepended header"
    );
    Ok(())
}

#[cfg(unix)]
fn set_artifact_mode(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_artifact_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
