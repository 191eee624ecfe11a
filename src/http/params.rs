use indexmap::IndexMap;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::error::Result;

// 支持 :param? 可选参数 和 * 通配符
const PATH_PARAMS: &str = r"(?s)(?::([^/\.?]+)\??)|(\*)";

static PATH_PARAMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PATH_PARAMS).expect("path param pattern is valid"));

pub type Pairs = IndexMap<String, Vec<String>>;

/// URL 参数结构
#[derive(Debug, Clone, Default)]
pub struct Params {
    /// 原始请求 URL，包括 query
    pub url: String,
    /// Path 参数，例如 /user/:id -> {"id": "123"}，按 pattern 中出现的顺序
    pub data: Option<IndexMap<String, String>>,
    /// Query 参数，例如 ?active=true -> {"active": ["true"]}
    pub query: Pairs,
}

impl Params {
    /// Parses the query string of `url` and, when `pattern` is given, the
    /// path variables. A pattern that does not match leaves `data` empty.
    pub fn new(url: impl Into<String>, pattern: Option<&str>) -> Result<Self> {
        let url = url.into();
        let query = url
            .split_once('?')
            .map(|(_, qs)| Self::parse_pairs(qs))
            .unwrap_or_default();
        let data = match pattern {
            Some(pattern) => {
                let path = url.split_once('?').map_or(url.as_str(), |(path, _)| path);
                Self::extract_params(path, pattern)?
            }
            None => None,
        };
        Ok(Self {
            url,
            data,
            query,
        })
    }

    /// Decodes `a=1&b=2&a=3`, keeping first-seen key order and repeats.
    pub fn parse_pairs(pairs: &str) -> Pairs {
        let mut map = Pairs::new();
        for (k, v) in form_urlencoded::parse(pairs.as_bytes()) {
            map.entry(k.into_owned()).or_default().push(v.into_owned());
        }
        map
    }

    /// 将 path pattern 转为正则并提取变量名
    ///
    /// Examples:
    /// "/user/:id/profile" => regex: "/user/([^/]+)/profile", params: ["id"]
    /// "/file/:name.:ext"   => regex: "/file/([^/]+)\\.([^/]+)", params: ["name","ext"]
    /// "/static/*"          => regex: "/static/(.*)", params: ["*"]
    pub fn parse_path_regex(path: &str) -> (String, Vec<String>) {
        let mut regex_str = String::new();
        let mut param_names = Vec::new();
        let mut pos = 0;

        for caps in PATH_PARAMS_RE.captures_iter(path) {
            let Some(whole) = caps.get(0) else { continue };
            regex_str += &regex::escape(&path[pos..whole.start()]);

            if caps.get(2).is_some() {
                regex_str += "(.*)";
                param_names.push("*".to_string());
            } else if let Some(name) = caps.get(1) {
                if whole.as_str().ends_with('?') {
                    regex_str += "([^/]*)";
                } else {
                    regex_str += "([^/]+)";
                }
                param_names.push(name.as_str().to_string());
            }

            pos = whole.end();
        }

        regex_str += &regex::escape(&path[pos..]);
        (format!("^{}$", regex_str), param_names)
    }

    /// 将 path 按 pattern 解析 path params；不匹配时返回 `None`
    ///
    /// Captured segments are percent-decoded; `+` stays literal in paths.
    pub fn extract_params(path: &str, pattern: &str) -> Result<Option<IndexMap<String, String>>> {
        let (regex_str, param_names) = Self::parse_path_regex(pattern);

        let re = Regex::new(&regex_str)?;
        let Some(caps) = re.captures(path) else {
            return Ok(None);
        };
        let map = param_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let value = caps.get(i + 1).map_or_else(String::new, |m| {
                    percent_decode_str(m.as_str()).decode_utf8_lossy().into_owned()
                });
                (name, value)
            })
            .collect();
        Ok(Some(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_path() {
        let params = Params::extract_params("/user/123/profile", "/user/:id/profile")
            .unwrap()
            .unwrap();
        assert_eq!(params.get("id").unwrap(), "123");
    }

    #[test]
    fn test_star_path() {
        let params = Params::extract_params("/static/css/main.css", "/static/*")
            .unwrap()
            .unwrap();
        assert_eq!(params.get("*").unwrap(), "css/main.css");
    }

    #[test]
    fn test_optional_param() {
        let params = Params::extract_params("/user/", "/user/:id?").unwrap().unwrap();
        assert_eq!(params.get("id").unwrap(), "");
        assert!(Params::extract_params("/user", "/user/:id?").unwrap().is_none());
    }

    #[test]
    fn test_ext_param_order() {
        let params = Params::extract_params("/file/report.pdf", "/file/:name.:ext")
            .unwrap()
            .unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["name", "ext"]);
        assert_eq!(params.get("ext").unwrap(), "pdf");
    }

    #[test]
    fn test_path_with_query() {
        let params = Params::new("/search/rust?sort=asc&tag=b&tag=a", Some("/search/:q")).unwrap();
        assert_eq!(params.data.as_ref().unwrap().get("q").unwrap(), "rust");
        assert_eq!(params.query.get("tag").unwrap(), &vec!["b".to_string(), "a".to_string()]);
        assert_eq!(params.query.keys().collect::<Vec<_>>(), vec!["sort", "tag"]);
    }

    #[test]
    fn test_path_segments_percent_decoded() {
        let params = Params::extract_params("/user/%20bob/a%2Fb+c", "/user/:id/:rest")
            .unwrap()
            .unwrap();
        assert_eq!(params.get("id").unwrap(), " bob");
        assert_eq!(params.get("rest").unwrap(), "a/b+c");
    }
}
