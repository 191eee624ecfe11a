#[cfg(test)]
mod tests {
    use reqmap::http::params::Params;

    #[test]
    fn test_new_params_with_query() {
        let url = "/search?q=rust&tags=programming&tags=backend".to_string();
        let params = Params::new(url.clone(), None).unwrap();

        assert_eq!(params.url, url);
        assert_eq!(params.query.get("q").unwrap(), &vec!["rust".to_string()]);

        // 多值参数保持顺序
        let tags = params.query.get("tags").unwrap();
        assert_eq!(tags, &vec!["programming".to_string(), "backend".to_string()]);
    }

    #[test]
    fn test_new_params_without_query() {
        let params = Params::new("/home", None).unwrap();
        assert!(params.query.is_empty());
        assert!(params.data.is_none());
    }

    #[test]
    fn test_parse_special_characters() {
        let parsed = Params::parse_pairs("name=G%26M&city=New+York");
        assert_eq!(parsed.get("name").unwrap()[0], "G&M");
        assert_eq!(parsed.get("city").unwrap()[0], "New York");
    }

    #[test]
    fn test_parse_form_body() {
        let form = Params::parse_pairs("user=alice&token=secret123&user=bob");
        assert_eq!(form.keys().collect::<Vec<_>>(), vec!["user", "token"]);
        assert_eq!(form.get("user").unwrap(), &vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_empty_values() {
        let parsed = Params::parse_pairs("key1=&key2");
        assert_eq!(parsed.get("key1").unwrap()[0], "");
        assert_eq!(parsed.get("key2").unwrap()[0], "");
    }

    #[test]
    fn test_path_variables_ignore_query() {
        let params = Params::new("/user/42/posts?page=2", Some("/user/:uid/posts")).unwrap();
        let data = params.data.unwrap();
        assert_eq!(data.get("uid").unwrap(), "42");
        assert_eq!(params.query.get("page").unwrap()[0], "2");
    }

    #[test]
    fn test_unmatched_pattern() {
        let params = Params::new("/user", Some("/post/:id")).unwrap();
        assert!(params.data.is_none());
    }
}
