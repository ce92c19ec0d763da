//! Ordered keyword tables. Each table is evaluated top to bottom and the
//! first matching rule wins; add a rule by adding a row.

use std::sync::LazyLock;

use recap_core::ShellCommand;
use regex::Regex;

// ── User requests ──

/// A rule matches when every pattern matches the request.
struct RequestRule {
    all_of: Vec<Regex>,
    phrase: &'static str,
}

fn rule(patterns: &[&str], phrase: &'static str) -> RequestRule {
    RequestRule {
        all_of: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        phrase,
    }
}

const REMOTE_HOST: &str = r"(?i)\b(gitlab|github)";

/// English keywords are anchored at a word start so `add` does not fire on
/// `address`; Hangul keywords match anywhere since particles attach to them.
/// Shell commands, by contrast, match whole words only.
static REQUEST_RULES: LazyLock<Vec<RequestRule>> = LazyLock::new(|| {
    vec![
        rule(
            &[REMOTE_HOST, r"(?i)\bpush|푸시"],
            "Create remote repository and push code",
        ),
        rule(
            &[REMOTE_HOST, r"(?i)\bcreate|생성"],
            "Create remote repository",
        ),
        rule(
            &[r"(?i)\b(install|setup\b|set up\b)|설치"],
            "Install packages and set up environment",
        ),
        rule(
            &[r"(?i)\b(analy|review)|분석|검토"],
            "Analyze and review codebase",
        ),
        rule(
            &[r"(?i)\b(fix|bug|broken|error)|수정|고쳐|오류|버그"],
            "Fix errors in code",
        ),
        rule(
            &[r"(?i)\b(add\b|implement|support\b)|추가|구현"],
            "Add new feature",
        ),
        rule(
            &[r"(?i)\b(improve|refactor|optimi[sz]|clean ?up)|개선|리팩|최적화"],
            "Improve existing code",
        ),
    ]
});

/// Work-item phrase for a user request, if any rule matches.
pub fn classify_request(request: &str) -> Option<&'static str> {
    REQUEST_RULES
        .iter()
        .find(|r| r.all_of.iter().all(|re| re.is_match(request)))
        .map(|r| r.phrase)
}

// ── Shell commands ──

type ShellPredicate = fn(&[ShellCommand]) -> bool;

static GIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bgit\b").unwrap());
static TEST_RUNNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(py)?tests?\b").unwrap());
static BUILD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bbuild\b").unwrap());
static PACKAGE_MANAGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(npm|npx|yarn|pnpm|pip3?|poetry|cargo|make|gradle|mvn)\b").unwrap()
});

fn git_with(commands: &[ShellCommand], verb: &str) -> bool {
    commands
        .iter()
        .any(|c| GIT.is_match(&c.command) && c.command.contains(verb))
}

fn any_matches(commands: &[ShellCommand], re: &Regex) -> bool {
    commands.iter().any(|c| re.is_match(&c.command))
}

fn any_git(commands: &[ShellCommand]) -> bool {
    any_matches(commands, &GIT)
}

fn committed_and_pushed(commands: &[ShellCommand]) -> bool {
    git_with(commands, "commit") && git_with(commands, "push")
}

fn committed(commands: &[ShellCommand]) -> bool {
    git_with(commands, "commit")
}

fn pushed(commands: &[ShellCommand]) -> bool {
    git_with(commands, "push")
}

fn ran_tests(commands: &[ShellCommand]) -> bool {
    any_matches(commands, &TEST_RUNNER)
}

fn ran_build(commands: &[ShellCommand]) -> bool {
    any_matches(commands, &BUILD) || any_matches(commands, &PACKAGE_MANAGER)
}

const SHELL_RULES: &[(ShellPredicate, &str)] = &[
    (committed_and_pushed, "Changes committed and pushed"),
    (committed, "Changes committed"),
    (pushed, "Changes pushed"),
    (any_git, "Git operations run"),
    (ran_tests, "Tests run"),
    (ran_build, "Build run"),
];

/// Fixed phrase for a batch of shell commands, if any rule matches.
pub fn classify_shell(commands: &[ShellCommand]) -> Option<&'static str> {
    SHELL_RULES
        .iter()
        .find(|(pred, _)| pred(commands))
        .map(|(_, phrase)| *phrase)
}
