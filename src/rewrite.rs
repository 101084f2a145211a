/// Literal replacement of one reference path by another
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        RewriteRule {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Applies the rules in order over the whole text, markdown syntax is not
/// considered: code blocks and prose are rewritten too.
///
/// A rule sees the output of the rules before it, so the first rule matching a
/// piece of text wins.
pub fn apply_rules(text: &str, rules: &[RewriteRule]) -> (String, Vec<Substitution>) {
    let mut content = text.to_string();
    let mut substitutions = vec![];

    for rule in rules {
        if rule.from.is_empty() || rule.from == rule.to {
            continue;
        }

        let count = content.matches(rule.from.as_str()).count();
        if count == 0 {
            continue;
        }

        content = content.replace(rule.from.as_str(), rule.to.as_str());
        substitutions.push(Substitution {
            from: rule.from.clone(),
            to: rule.to.clone(),
            count,
        });
    }

    (content, substitutions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_occurrences() {
        let rules = vec![RewriteRule::new("./foo/bar.png", "~/assets/images/blog/foo-bar.png")];
        let text = "![a](./foo/bar.png)\n\n```\ncp ./foo/bar.png /tmp\n```\n";
        let (content, subs) = apply_rules(text, &rules);
        assert_eq!(content, "![a](~/assets/images/blog/foo-bar.png)\n\n```\ncp ~/assets/images/blog/foo-bar.png /tmp\n```\n");
        assert_eq!(subs, vec![Substitution {
            from: "./foo/bar.png".to_string(),
            to: "~/assets/images/blog/foo-bar.png".to_string(),
            count: 2,
        }]);
    }

    #[test]
    fn test_special_chars_are_literal() {
        let rules = vec![RewriteRule::new("./a+b/(x).png", "/img/x.png")];
        let (content, subs) = apply_rules("see ./a+b/(x).png and ./aab/x.png", &rules);
        assert_eq!(content, "see /img/x.png and ./aab/x.png");
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_first_rule_wins() {
        let rules = vec![
            RewriteRule::new("./post/pic.png", "/first/pic.png"),
            RewriteRule::new("./post/pic.png", "/second/pic.png"),
        ];
        let (content, subs) = apply_rules("![](./post/pic.png)", &rules);
        assert_eq!(content, "![](/first/pic.png)");
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_no_match_keeps_text() {
        let rules = vec![
            RewriteRule::new("./post/pic.png", "/img/pic.png"),
            RewriteRule::new("", "/img/x.png"),
            RewriteRule::new("same", "same"),
        ];
        let (content, subs) = apply_rules("nothing same here", &rules);
        assert_eq!(content, "nothing same here");
        assert!(subs.is_empty());
    }
}
