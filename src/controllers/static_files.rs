//! Files of the web UI.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use log::debug;

use crate::content_type::ContentTypeMap;
use crate::parser::Method;
use crate::router::{RouteError, Router};
use crate::server::{handler_factory, Error, HandlerFactory, HttpResponse, StatusCode};

const INDEX_FILE: &str = "index.html";

/// Serves the files below `root` under `url_prefix`.
///
/// The file route ends in a `:path*` catch-all, so this controller has to be
/// registered after every other controller sharing its prefix.
pub struct StaticController {
    url_prefix: String,
    root: Arc<PathBuf>,
    content_types: Arc<ContentTypeMap>,
}

impl StaticController {
    pub fn new(url_prefix: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            root: Arc::new(root.into()),
            content_types: Arc::new(ContentTypeMap::new()),
        }
    }

    /// Use `content_types` instead of the built-in extension table.
    pub fn with_content_types(mut self, content_types: ContentTypeMap) -> Self {
        self.content_types = Arc::new(content_types);
        self
    }

    pub fn define_routes(&self, router: &mut Router<HandlerFactory>) -> Result<(), RouteError> {
        let index = if self.url_prefix.is_empty() { "/" } else { self.url_prefix.as_str() };
        router.define_route(Method::GET, index, self.serve())?;
        router.define_route(Method::GET, &format!("{}/:path*", self.url_prefix), self.serve())?;
        Ok(())
    }

    fn serve(&self) -> HandlerFactory {
        let root = self.root.clone();
        let content_types = self.content_types.clone();
        handler_factory(move |request| {
            let root = root.clone();
            let content_types = content_types.clone();
            async move {
                let requested = request.get_param("path").map(String::as_str).unwrap_or("");
                let path = resolve(&root, requested)
                    .ok_or_else(|| Error::NotFound(request.route_path().to_string()))?;
                read_file(&path, &content_types, request.route_path()).await
            }
        })
    }
}

/// Percent-decode `requested` and join it onto `root`, refusing anything that
/// could leave `root`.
fn resolve(root: &Path, requested: &str) -> Option<PathBuf> {
    let requested = urlencoding::decode(requested).ok()?;
    if requested.contains('\0') {
        return None;
    }

    let mut path = root.to_path_buf();
    for component in Path::new(requested.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}

async fn read_file(path: &Path, content_types: &ContentTypeMap, url_path: &str) -> Result<HttpResponse, Error> {
    let not_found = |e: std::io::Error| match e.kind() {
        ErrorKind::NotFound => Error::NotFound(url_path.to_string()),
        _ => Error::IoError(e),
    };

    let mut path = path.to_path_buf();
    if tokio::fs::metadata(&path).await.map_err(not_found)?.is_dir() {
        path.push(INDEX_FILE);
    }

    let data = tokio::fs::read(&path).await.map_err(not_found)?;
    debug!("Serving {} ({} bytes)", path.display(), data.len());

    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type(content_types.detect(&path, &data))
        .with_body_bytes(data))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::resolve;

    #[test]
    fn test_resolve_stays_below_root() {
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "css/site.css"), Some(PathBuf::from("/srv/www/css/site.css")));
        assert_eq!(resolve(root, "/./index.html"), Some(PathBuf::from("/srv/www/index.html")));
        assert_eq!(resolve(root, ""), Some(PathBuf::from("/srv/www")));
        assert_eq!(resolve(root, "../etc/passwd"), None);
        assert_eq!(resolve(root, "css/../../etc/passwd"), None);
        assert_eq!(resolve(root, "a\0b"), None);
    }

    #[test]
    fn test_resolve_decodes_before_checking() {
        let root = Path::new("/srv/www");
        assert_eq!(resolve(root, "my%20cover.png"), Some(PathBuf::from("/srv/www/my cover.png")));
        assert_eq!(resolve(root, "%2e%2e/etc/passwd"), None);
        assert_eq!(resolve(root, "css/%2E%2E/%2e%2e/etc/passwd"), None);
        assert_eq!(resolve(root, "%2Fetc%2Fpasswd"), Some(PathBuf::from("/srv/www/etc/passwd")));
        assert_eq!(resolve(root, "a%00b"), None);
        // Not valid UTF-8 once decoded
        assert_eq!(resolve(root, "%ff"), None);
    }
}
