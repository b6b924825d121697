//! Format dispatch and artifact persistence.
//!
//! The response's `content-type` header picks one saver via a
//! case-insensitive substring match against a fixed ordered category
//! set; the first matching category wins. HTML content is rendered in
//! the browser and produces three artifacts; everything else stores the
//! raw body under a type-derived extension; unrecognized types fall back
//! to a rendered-HTML snapshot.

use crate::error::ArchiveError;
use std::path::Path;

/// How a response is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    /// Render in the browser: `.html` + `.pdf` + `.png` screenshot.
    RenderedPage,
    /// Store the raw body as `<hash>.<ext>`.
    RawBody { ext: String },
    /// Unrecognized type: render and keep the `.html` only.
    FallbackPage,
}

/// Decide the save plan for a declared content type.
///
/// First matching category in the fixed order wins.
pub fn plan_for(content_type: &str) -> SavePlan {
    let ct = content_type.to_ascii_lowercase();

    if ct.contains("text/html") {
        return SavePlan::RenderedPage;
    }
    if ct.contains("application/pdf") {
        return SavePlan::RawBody { ext: "pdf".into() };
    }
    if ct.contains("image/") {
        let ext = if ct.contains("jpeg") {
            "jpg"
        } else if ct.contains("gif") {
            "gif"
        } else {
            "png"
        };
        return SavePlan::RawBody { ext: ext.into() };
    }
    if ct.contains("video/") {
        return SavePlan::RawBody {
            ext: video_ext(&ct),
        };
    }
    if ct.contains("text/csv") {
        return SavePlan::RawBody { ext: "csv".into() };
    }
    if ct.contains("application/vnd.ms-excel") {
        return SavePlan::RawBody { ext: "xls".into() };
    }
    if ct.contains("spreadsheetml") {
        return SavePlan::RawBody { ext: "xlsx".into() };
    }
    if ct.contains("application/msword") {
        return SavePlan::RawBody { ext: "doc".into() };
    }
    if ct.contains("wordprocessingml") {
        return SavePlan::RawBody { ext: "docx".into() };
    }
    if ct.contains("application/zip") {
        return SavePlan::RawBody { ext: "zip".into() };
    }

    SavePlan::FallbackPage
}

/// Subtype of a `video/*` content type, defaulting to `mp4`.
fn video_ext(ct: &str) -> String {
    let subtype = ct
        .split("video/")
        .nth(1)
        .and_then(|rest| rest.split(';').next())
        .map(str::trim)
        .unwrap_or("");
    if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        "mp4".into()
    } else {
        subtype.to_string()
    }
}

/// Write one artifact into the per-hash directory.
pub async fn write_artifact(
    dir: &Path,
    hash: &str,
    ext: &str,
    data: &[u8],
) -> Result<String, ArchiveError> {
    let filename = format!("{hash}.{ext}");
    let path = dir.join(&filename);
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| ArchiveError::save(&format!("writing {}", path.display()), e))?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_renders_three_artifacts() {
        assert_eq!(plan_for("text/html; charset=utf-8"), SavePlan::RenderedPage);
        assert_eq!(plan_for("TEXT/HTML"), SavePlan::RenderedPage);
    }

    #[test]
    fn test_pdf() {
        assert_eq!(
            plan_for("application/pdf"),
            SavePlan::RawBody { ext: "pdf".into() }
        );
    }

    #[test]
    fn test_image_extensions() {
        assert_eq!(
            plan_for("image/jpeg"),
            SavePlan::RawBody { ext: "jpg".into() }
        );
        assert_eq!(
            plan_for("image/gif"),
            SavePlan::RawBody { ext: "gif".into() }
        );
        assert_eq!(
            plan_for("image/webp"),
            SavePlan::RawBody { ext: "png".into() }
        );
    }

    #[test]
    fn test_video_subtype_extension() {
        assert_eq!(
            plan_for("video/webm"),
            SavePlan::RawBody { ext: "webm".into() }
        );
        assert_eq!(
            plan_for("video/mp4; codecs=avc1"),
            SavePlan::RawBody { ext: "mp4".into() }
        );
        assert_eq!(
            plan_for("video/x-msvideo"),
            SavePlan::RawBody {
                ext: "x-msvideo".into()
            }
        );
        assert_eq!(plan_for("video/"), SavePlan::RawBody { ext: "mp4".into() });
    }

    #[test]
    fn test_csv_and_office_types() {
        assert_eq!(
            plan_for("text/csv"),
            SavePlan::RawBody { ext: "csv".into() }
        );
        assert_eq!(
            plan_for("application/vnd.ms-excel"),
            SavePlan::RawBody { ext: "xls".into() }
        );
        assert_eq!(
            plan_for("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
            SavePlan::RawBody {
                ext: "xlsx".into()
            }
        );
        assert_eq!(
            plan_for("application/msword"),
            SavePlan::RawBody { ext: "doc".into() }
        );
        assert_eq!(
            plan_for("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            SavePlan::RawBody {
                ext: "docx".into()
            }
        );
        assert_eq!(
            plan_for("application/zip"),
            SavePlan::RawBody { ext: "zip".into() }
        );
    }

    #[test]
    fn test_unrecognized_falls_back_to_rendered_html() {
        assert_eq!(plan_for("application/octet-stream"), SavePlan::FallbackPage);
        assert_eq!(plan_for(""), SavePlan::FallbackPage);
    }

    #[tokio::test]
    async fn test_write_artifact_names_by_hash() {
        let dir = tempfile::tempdir().unwrap();
        let name = write_artifact(dir.path(), "cafe01", "html", b"<html/>")
            .await
            .unwrap();
        assert_eq!(name, "cafe01.html");
        let on_disk = std::fs::read(dir.path().join(&name)).unwrap();
        assert_eq!(on_disk, b"<html/>");
    }
}
