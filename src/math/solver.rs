//! Arithmetic verification questions
//!
//! Pulls an expression such as `(10 - 2) / 4` out of free text and evaluates it
//! with a small recursive-descent parser. Only `+ - * /` and parentheses.

/// Nesting deeper than this is rejected rather than recursed into
const MAX_DEPTH: usize = 64;

/// Korean words that mark a sentence as a calculation question
const QUESTION_CUES: &[&str] = &["몇", "값", "계산", "결과", "얼마", "답"];

/// Find the arithmetic expression embedded in `text`
///
/// Scans maximal runs of digits, whitespace, parentheses and operators, keeps the
/// longest run containing `digits op digits`, and collapses its whitespace.
pub fn extract_expression(text: &str) -> Option<String> {
    let mut longest: Option<&str> = None;
    let mut longest_len = 0;

    for run in text.split(|c: char| !is_expression_char(c)) {
        let trimmed = run.trim();
        let len = trimmed.chars().count();
        if len > longest_len && has_binary_operation(trimmed) {
            longest = Some(trimmed);
            longest_len = len;
        }
    }

    longest.map(|expr| expr.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Evaluate an expression, rounding the result to two decimal places
///
/// `None` for anything outside the grammar, unbalanced parentheses, or a
/// non-finite result (division by zero).
pub fn evaluate(expression: &str) -> Option<f64> {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return None;
    }

    if !compact
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
    {
        tracing::debug!("expression rejected, unexpected character: {:?}", expression);
        return None;
    }

    if !parentheses_balanced(&compact) {
        tracing::debug!("expression rejected, unbalanced parentheses: {:?}", expression);
        return None;
    }

    // "++" / "--" are increment tokens in the usual grammar, not two signs
    if compact.contains("++") || compact.contains("--") {
        return None;
    }

    let mut parser = Parser::new(&compact);
    let value = parser.parse()?;

    if !value.is_finite() {
        tracing::debug!("expression rejected, non-finite result: {:?}", expression);
        return None;
    }

    let rounded = round_to_cents(value);
    rounded.is_finite().then_some(rounded)
}

/// Extract then evaluate
pub fn extract_and_calculate(text: &str) -> Option<f64> {
    let expression = extract_expression(text)?;
    evaluate(&expression)
}

/// Whether `text` reads as an arithmetic question rather than data with operators in it
///
/// Needs `=`, `?` or a Korean question cue, and no hyphenated digit groups
/// such as dates and phone numbers (`1990-01-01`, `010-1234-5678`).
pub fn is_math_question(text: &str) -> bool {
    let has_marker = text.contains('=')
        || text.contains('?')
        || QUESTION_CUES.iter().any(|cue| text.contains(cue));

    has_marker && !has_hyphenated_digit_groups(text) && extract_expression(text).is_some()
}

/// Three or more digit groups joined by bare hyphens
fn has_hyphenated_digit_groups(text: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_digit() || c == '-'))
        .any(|token| {
            let groups: Vec<&str> = token.split('-').collect();
            groups.len() >= 3 && groups.iter().all(|g| !g.is_empty())
        })
}

fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')')
}

/// Some operator has a digit on both sides (whitespace allowed in between)
fn has_binary_operation(run: &str) -> bool {
    let chars: Vec<char> = run.chars().collect();

    chars.iter().enumerate().any(|(i, c)| {
        if !matches!(c, '+' | '-' | '*' | '/') {
            return false;
        }
        let before = chars[..i].iter().rev().find(|c| !c.is_whitespace());
        let after = chars[i + 1..].iter().find(|c| !c.is_whitespace());
        matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
    })
}

/// Counter never negative and ends at zero
fn parentheses_balanced(text: &str) -> bool {
    let mut balance: i64 = 0;
    for c in text.chars() {
        match c {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    balance == 0
}

/// Half-up rounding to two decimals (-2.345 → -2.34)
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Recursive-descent evaluator
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/') factor)*
/// factor := ('+' | '-') factor | primary
/// primary:= number | '(' expr ')'
/// ```
struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    /// Whole input must be consumed
    fn parse(&mut self) -> Option<f64> {
        let value = self.expr()?;
        (self.pos == self.input.len()).then_some(value)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        let sign = match self.peek()? {
            b'-' => -1.0,
            b'+' => 1.0,
            _ => return self.primary(),
        };
        self.pos += 1;
        // stacked signs ("+-3") nest like parentheses
        self.descend(|p| p.factor()).map(|v| sign * v)
    }

    fn primary(&mut self) -> Option<f64> {
        if self.peek()? == b'(' {
            self.pos += 1;
            let value = self.descend(|p| p.expr())?;
            if self.peek()? != b')' {
                return None;
            }
            self.pos += 1;
            return Some(value);
        }
        self.number()
    }

    fn descend(&mut self, f: impl FnOnce(&mut Self) -> Option<f64>) -> Option<f64> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return None;
        }
        let value = f(self);
        self.depth -= 1;
        value
    }

    /// `digits ['.' digits*]` or `'.' digits`; no leading zero before another digit
    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut digits = 0;

        let next_is_digit = self.input.get(self.pos + 1).is_some_and(u8::is_ascii_digit);
        if self.peek() == Some(b'0') && next_is_digit {
            return None;
        }

        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
            digits += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while let Some(b'0'..=b'9') = self.peek() {
                self.pos += 1;
                digits += 1;
            }
        }

        if digits == 0 {
            self.pos = start;
            return None;
        }

        std::str::from_utf8(&self.input[start..self.pos])
            .ok()?
            .parse::<f64>()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple() {
        assert_eq!(extract_expression("2 + 3은 몇인가요?").as_deref(), Some("2 + 3"));
        assert_eq!(
            extract_expression("(10 - 2) / 4는?").as_deref(),
            Some("(10 - 2) / 4")
        );
        assert_eq!(
            extract_expression("3 * 4 + 5는 몇인가요?").as_deref(),
            Some("3 * 4 + 5")
        );
        assert_eq!(extract_expression("5 * 6의 값은?").as_deref(), Some("5 * 6"));
        assert_eq!(extract_expression("20 / 4의 결과는?").as_deref(), Some("20 / 4"));
        assert_eq!(extract_expression("15 - 7은?").as_deref(), Some("15 - 7"));
        assert_eq!(
            extract_expression("계산: (5 + 3) * 2").as_deref(),
            Some("(5 + 3) * 2")
        );
    }

    #[test]
    fn test_extract_collapses_whitespace() {
        assert_eq!(extract_expression("2  +  3").as_deref(), Some("2 + 3"));
        assert_eq!(extract_expression("what is 2\t*\n3?").as_deref(), Some("2 * 3"));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_expression("숫자를 입력하세요"), None);
        assert_eq!(extract_expression("123"), None);
        assert_eq!(extract_expression("2 + + 3은?"), None);
        assert_eq!(extract_expression(""), None);
    }

    #[test]
    fn test_extract_longest_run() {
        assert_eq!(
            extract_expression("Q1: 1 + 1, Q2: 12 * 30 - 4").as_deref(),
            Some("12 * 30 - 4")
        );
    }

    #[test]
    fn test_evaluate_basic() {
        assert_eq!(evaluate("2 + 3"), Some(5.0));
        assert_eq!(evaluate("10 - 4"), Some(6.0));
        assert_eq!(evaluate("3 * 4"), Some(12.0));
        assert_eq!(evaluate("10 / 2"), Some(5.0));
        assert_eq!(evaluate("100 * 100"), Some(10000.0));
        assert_eq!(evaluate("5 - 10"), Some(-5.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(evaluate("2 + 3 * 4"), Some(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Some(20.0));
        assert_eq!(evaluate("(10 - 2) / 4"), Some(2.0));
        assert_eq!(evaluate("10 - 2 - 3"), Some(5.0));
        assert_eq!(evaluate("8 / 2 / 2"), Some(2.0));
        assert_eq!(evaluate("((1 + 2) * (3 + 4))"), Some(21.0));
    }

    #[test]
    fn test_evaluate_rounding() {
        assert_eq!(evaluate("10 / 3"), Some(3.33));
        assert_eq!(evaluate("7 / 2"), Some(3.5));
        assert_eq!(evaluate("2 / 3"), Some(0.67));
    }

    #[test]
    fn test_evaluate_unary_and_decimals() {
        assert_eq!(evaluate("-5 + 3"), Some(-2.0));
        assert_eq!(evaluate("2 * -3"), Some(-6.0));
        assert_eq!(evaluate("1.5 + 1.5"), Some(3.0));
        assert_eq!(evaluate(".5 * 4"), Some(2.0));
    }

    #[test]
    fn test_evaluate_stacked_signs() {
        assert_eq!(evaluate("2*+-3"), Some(-6.0));
        assert_eq!(evaluate("-+4"), Some(-4.0));
        assert_eq!(evaluate("2 - +3"), Some(-1.0));
        assert_eq!(evaluate("2 * -(1 + 2)"), Some(-6.0));
        let deep = format!("{}1", "+-".repeat(100));
        assert_eq!(evaluate(&deep), None);
    }

    #[test]
    fn test_evaluate_rejects_leading_zero() {
        assert_eq!(evaluate("010-1"), None);
        assert_eq!(evaluate("08+1"), None);
        assert_eq!(evaluate("0 + 1"), Some(1.0));
        assert_eq!(evaluate("0.5 * 2"), Some(1.0));
        assert_eq!(evaluate("10 - 0"), Some(10.0));
    }

    #[test]
    fn test_math_question_markers() {
        assert!(is_math_question("2 + 3 = ?"));
        assert!(is_math_question("What is 3 * 4?"));
        assert!(is_math_question("2 + 3은 몇인가요"));
        assert!(is_math_question("(10 - 2) / 4의 값"));
        assert!(is_math_question("계산: (5 + 3) * 2"));
    }

    #[test]
    fn test_math_question_rejects_data() {
        assert!(!is_math_question("Date of birth (1990-01-01)"));
        assert!(!is_math_question("Contact (010-1234-5678)"));
        assert!(!is_math_question("Rate 1-5"));
        assert!(!is_math_question("생년월일 (1990-01-01)을 입력하세요?"));
        assert!(!is_math_question("What is your name?"));
    }

    #[test]
    fn test_evaluate_rejects_malformed() {
        for expr in ["2 +", "abc", "()", "2 ** 3", "1.2.3", "2(3)", "--5", "2 ++ 3", "", "   "] {
            assert_eq!(evaluate(expr), None, "{:?}", expr);
        }
    }

    #[test]
    fn test_evaluate_rejects_unbalanced() {
        for expr in ["(2 + 3", "2 + 3)", ")2 + 3(", "((1)", "(1))"] {
            assert_eq!(evaluate(expr), None, "{:?}", expr);
        }
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(evaluate("5 / 0"), None);
        assert_eq!(evaluate("0 / 0"), None);
    }

    #[test]
    fn test_evaluate_deep_nesting_rejected() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), None);
        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(evaluate(&shallow), Some(1.0));
    }

    #[test]
    fn test_evaluate_own_output() {
        for expr in ["2 + 3", "10 / 3", "7 / 2", "5 - 10"] {
            let value = evaluate(expr).unwrap();
            assert_eq!(evaluate(&value.to_string()), Some(value), "{}", expr);
        }
    }

    #[test]
    fn test_extract_and_calculate() {
        assert_eq!(extract_and_calculate("2 + 3은 몇인가요?"), Some(5.0));
        assert_eq!(extract_and_calculate("계산하세요: 10 - 4"), Some(6.0));
        assert_eq!(extract_and_calculate("(5 + 3) * 2의 값은?"), Some(16.0));
        assert_eq!(extract_and_calculate("(10 - 2) / 4는?"), Some(2.0));
        assert_eq!(extract_and_calculate("This has no math"), None);
        assert_eq!(extract_and_calculate("2 + + 3은?"), None);
        assert_eq!(extract_and_calculate("5 / 0 = ?"), None);
    }
}
