use std::{borrow::Cow, collections::HashMap};

use crate::error::{Error, Result};

/// Named route patterns used by `redirect_to_route`.
///
/// Patterns are paths whose `:name` segments are filled from parameters. A trailing `?`
/// (`/users/:id?`) makes the segment optional: it is dropped when the parameter is missing.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<Cow<'static, str>, Cow<'static, str>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route<N, P>(mut self, name: N, pattern: P) -> Self
    where
        N: Into<Cow<'static, str>>,
        P: Into<Cow<'static, str>>,
    {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    /// Build the path for route `name`. Parameter values are percent-encoded.
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| Error::UnknownRoute(name.to_owned()))?;

        let lookup = |param: &str| {
            params
                .iter()
                .rev()
                .find(|(key, _)| *key == param)
                .map(|(_, value)| *value)
        };

        let mut segments = Vec::new();
        for segment in pattern.split('/') {
            let Some(param) = segment.strip_prefix(':') else {
                segments.push(Cow::Borrowed(segment));
                continue;
            };

            let (param, optional) = match param.strip_suffix('?') {
                Some(param) => (param, true),
                None => (param, false),
            };

            match lookup(param) {
                Some(value) => segments.push(urlencoding::encode(value)),
                None if optional => {}
                None => {
                    return Err(Error::MissingRouteParam {
                        route: name.to_owned(),
                        param: param.to_owned(),
                    });
                }
            }
        }

        let path = segments.join("/");
        if path.is_empty() {
            Ok("/".to_owned())
        } else {
            Ok(path)
        }
    }
}
