//! Rewrite rule tables
//!
//! A [`RuleSet`] is an ordered list of regex substitutions. Each rule runs over
//! the whole output of the previous one, so order matters: `long long` must be
//! shielded before bare `long` is narrowed, and unshielded afterwards.
//!
//! Both tables are immutable process-wide statics, compiled on first use.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};
use tracing::trace;

/// Sentinel standing in for `unsigned long long` while bare `long` is narrowed.
/// NUL bytes cannot appear in C source text.
const ULL_SENTINEL: &str = r"\x00UNLONGIFY_ULL\x00";
/// Sentinel standing in for `long long`.
const LL_SENTINEL: &str = r"\x00UNLONGIFY_LL\x00";

/// Static description of a rule, compiled into a [`Rule`].
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static [u8],
    /// Matches in which this capture group participates are left unchanged.
    pub keep_if: Option<&'static str>,
}

impl RuleSpec {
    const fn new(name: &'static str, pattern: &'static str, replacement: &'static [u8]) -> Self {
        Self {
            name,
            pattern,
            replacement,
            keep_if: None,
        }
    }

    const fn keep_if(mut self, group: &'static str) -> Self {
        self.keep_if = Some(group);
        self
    }
}

/// Applied to code tokens, in order.
pub const CODE_RULE_SPECS: &[RuleSpec] = &[
    // `long unsigned`, `long int unsigned` → `unsigned long`, `unsigned long int`
    RuleSpec::new(
        "unsigned-first",
        r"(?-u)\b(((long|int) )+)unsigned\b\s*",
        b"unsigned ${1}",
    ),
    // `long long int` is matched whole so it is not mistaken for `long int`
    RuleSpec::new(
        "collapse-long-int",
        r"(?-u)(?P<l>(^|\s|\(|,)+)(?P<ll>long\s+)?long\s+int(?P<r>(\s|[)*])+)",
        b"${l}int${r}",
    )
    .keep_if("ll"),
    RuleSpec::new(
        "shield-unsigned-long-long",
        r"(?-u)(?P<l>(^|\s|\(|,)+)unsigned\s+long\s+long(?P<r>(\s|[)*])+)",
        b"${l}\x00UNLONGIFY_ULL\x00${r}",
    ),
    RuleSpec::new(
        "shield-long-long",
        r"(?-u)(?P<l>(^|\s|\(|,)+)long\s+long(?P<r>(\s|[)*])+)",
        b"${l}\x00UNLONGIFY_LL\x00${r}",
    ),
    // `long double` is a floating type and stays
    RuleSpec::new(
        "narrow-long",
        r"(?-u)(?P<l>(^|\s|\(|,)+)long(?P<r>(\s|[)*])+)(?P<double>double\b)?",
        b"${l}int${r}",
    )
    .keep_if("double"),
    RuleSpec::new("restore-long-long", LL_SENTINEL, b"long long"),
    RuleSpec::new("restore-unsigned-long-long", ULL_SENTINEL, b"unsigned long long"),
];

/// Applied to string literal tokens: drop the `l` length modifier from
/// printf/scanf integer conversions. `%lld` is left alone.
pub const STRING_RULE_SPECS: &[RuleSpec] = &[RuleSpec::new(
    "strip-l-modifier",
    r"(?-u)(?P<l>%(?P<flag>[-+ 0#'I]*)(?P<width>\*?[0-9]*\$?)(?P<precision>\.\*?[0-9]*\$?)?)l?(?P<r>[idouxX])",
    b"${l}${r}",
)];

/// Rules for `Code` tokens.
pub static CODE_RULES: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(CODE_RULE_SPECS).expect("built-in code rules are valid"));

/// Rules for `String` tokens.
pub static STRING_RULES: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::compile(STRING_RULE_SPECS).expect("built-in string rules are valid"));

/// A compiled pattern → replacement substitution.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static [u8],
    keep_if: Option<&'static str>,
}

impl Rule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        Ok(Self {
            name: spec.name,
            pattern: Regex::new(spec.pattern)?,
            replacement: spec.replacement,
            keep_if: spec.keep_if,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replaces every non-overlapping match in `text`.
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    pub fn apply<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]> {
        match self.keep_if {
            None => self.pattern.replace_all(text, self.replacement),
            Some(group) => self.pattern.replace_all(text, |caps: &Captures<'_>| {
                if caps.name(group).is_some() {
                    return caps[0].to_vec();
                }
                let mut dst = Vec::new();
                caps.expand(self.replacement, &mut dst);
                dst
            }),
        }
    }
}

/// An ordered list of rules composed sequentially.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, regex::Error> {
        let rules = specs.iter().map(Rule::compile).collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule, in order, over the output of the previous one.
    pub fn apply<'t>(&self, text: &'t [u8]) -> Cow<'t, [u8]> {
        let mut out = Cow::Borrowed(text);
        for rule in &self.rules {
            let replaced = match rule.apply(&out) {
                Cow::Owned(bytes) => Some(bytes),
                Cow::Borrowed(_) => None,
            };
            if let Some(bytes) = replaced {
                trace!(rule = rule.name, "rule matched");
                out = Cow::Owned(bytes);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code(input: &str) -> String {
        String::from_utf8(CODE_RULES.apply(input.as_bytes()).into_owned()).unwrap()
    }

    fn string(input: &str) -> String {
        String::from_utf8(STRING_RULES.apply(input.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn test_tables_compile_in_order() {
        let names: Vec<_> = CODE_RULES.rules().iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "unsigned-first",
                "collapse-long-int",
                "shield-unsigned-long-long",
                "shield-long-long",
                "narrow-long",
                "restore-long-long",
                "restore-unsigned-long-long",
            ]
        );
        assert_eq!(STRING_RULES.rules().len(), 1);
    }

    #[test]
    fn test_single_rule_is_borrowed_without_match() {
        let rule = Rule::compile(&CODE_RULE_SPECS[4]).unwrap();
        assert!(matches!(rule.apply(b"int x;"), Cow::Borrowed(_)));
        assert_eq!(&*rule.apply(b"long x;"), b"int x;");
    }

    #[test]
    fn test_unchanged_code_is_borrowed() {
        assert!(matches!(CODE_RULES.apply(b"int main(void) {"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bare_long() {
        assert_eq!(code("long z;"), "int z;");
        assert_eq!(code("static long counter;\n"), "static int counter;\n");
        assert_eq!(code("long *p;"), "int *p;");
        assert_eq!(code("long* p;"), "int* p;");
        assert_eq!(code("x = (long)y;"), "x = (int)y;");
        assert_eq!(code("sizeof(long)"), "sizeof(int)");
        assert_eq!(code("f(long a, long b)"), "f(int a, int b)");
        assert_eq!(code("f(int a,long b)"), "f(int a,int b)");
    }

    #[test]
    fn test_compounds_are_protected() {
        assert_eq!(code("long long x;"), "long long x;");
        assert_eq!(code("unsigned long long y;"), "unsigned long long y;");
        assert_eq!(code("long a; long long b;"), "int a; long long b;");
        assert_eq!(code("(unsigned long long)v"), "(unsigned long long)v");
        assert_eq!(code("f(int a,long long b)"), "f(int a,long long b)");
    }

    #[test]
    fn test_long_int_collapses() {
        assert_eq!(code("long int y;"), "int y;");
        assert_eq!(code("unsigned long int u;"), "unsigned int u;");
        assert_eq!(code("long long int q;"), "long long int q;");
        assert_eq!(code("unsigned long long int q;"), "unsigned long long int q;");
    }

    #[test]
    fn test_unsigned_moves_first() {
        assert_eq!(code("long unsigned x;"), "unsigned int x;");
        assert_eq!(code("long int unsigned x;"), "unsigned int x;");
        assert_eq!(code("long long unsigned x;"), "unsigned long long x;");
    }

    #[test]
    fn test_long_double_is_kept() {
        assert_eq!(code("long double d;"), "long double d;");
        assert_eq!(code("long n; long double d;"), "int n; long double d;");
    }

    #[test]
    fn test_identifiers_and_glued_tokens_untouched() {
        assert_eq!(code("longitude = 3;"), "longitude = 3;");
        assert_eq!(code("longjmp(env, 1);"), "longjmp(env, 1);");
        assert_eq!(code("my_long x;"), "my_long x;");
        assert_eq!(code("along unsigned"), "along unsigned");
        // not followed by whitespace, `)` or `*`
        assert_eq!(code("long;"), "long;");
    }

    #[test]
    fn test_format_specifiers() {
        assert_eq!(string(r#""%ld\n""#), r#""%d\n""#);
        assert_eq!(string(r#""%-5.2lx""#), r#""%-5.2x""#);
        assert_eq!(string(r#""%-08lu""#), r#""%-08u""#);
        assert_eq!(string(r#""%*.*lx""#), r#""%*.*x""#);
        assert_eq!(string(r#""%1$ld %2$lX""#), r#""%1$d %2$X""#);
        assert_eq!(string(r#""%li %lo""#), r#""%i %o""#);
    }

    #[test]
    fn test_other_specifiers_untouched() {
        assert_eq!(string(r#""%lld""#), r#""%lld""#);
        assert_eq!(string(r#""%lf %s %c""#), r#""%lf %s %c""#);
        assert_eq!(string(r#""long day""#), r#""long day""#);
    }
}
