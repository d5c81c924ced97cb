/// 可被搜索框过滤的实体
pub trait Searchable {
    /// 参与搜索的字段
    fn search_fields(&self) -> Vec<&str>;
}

/// 不区分大小写的子串匹配，任一字段命中即保留；空白搜索词匹配全部
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_by_search<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_search(*item, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: &'static str,
        email: &'static str,
    }

    impl Searchable for Person {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.email]
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                name: "Alice Johnson",
                email: "a@x.com",
            },
            Person {
                name: "Bob Wilson",
                email: "b@x.com",
            },
        ]
    }

    #[test]
    fn test_empty_term_returns_everything() {
        assert_eq!(filter_by_search(&people(), ""), people());
        assert_eq!(filter_by_search(&people(), "   "), people());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            filter_by_search(&people(), "ALICE"),
            filter_by_search(&people(), "alice")
        );
        assert_eq!(filter_by_search(&people(), "ALICE").len(), 1);
    }

    #[test]
    fn test_matches_any_field() {
        let result = filter_by_search(&people(), "bob");
        assert_eq!(result, vec![people()[1].clone()]);

        let by_email = filter_by_search(&people(), "B@X.COM");
        assert_eq!(by_email, vec![people()[1].clone()]);

        assert!(filter_by_search(&people(), "charlie").is_empty());
    }
}
