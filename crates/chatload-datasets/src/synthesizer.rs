use chatload_types::{ScheduledReq, ScheduledVisit, SimReq, Visit, Workload};
use rand::Rng;
use regex::Regex;

use crate::common::{postprocess, NormalizeOpts};
use crate::error::{Error, Result};

/// Arithmetic-only closed form over the bucket index `t`: digits, `t`,
/// `+ - * / ( )`, and whitespace. Anything else (function calls, names,
/// conditionals) is rejected outright, since the expression is evaluated
/// directly rather than run as arbitrary code.
fn pattern() -> Regex {
    Regex::new(r"^[0-9tT+\-*/(). ]+$").unwrap()
}

/// A validated arrival-rate expression `N(t)`.
pub struct ArrivalFunction {
    source: String,
}

impl ArrivalFunction {
    /// Validates `expr` against the restrictive arithmetic pattern.
    pub fn parse(expr: &str) -> Result<Self> {
        if expr.trim().is_empty() || !pattern().is_match(expr) {
            return Err(Error::InvalidPattern(format!(
                "synthesizer function must be a closed-form arithmetic expression over `t`, got: {expr:?}"
            )));
        }
        Ok(Self { source: expr.to_string() })
    }

    /// Evaluates the expression at bucket index `t`, returning a
    /// non-negative visit count rounded down, or `None` once the value is
    /// non-positive (the schedule's termination condition).
    fn eval(&self, t: u64) -> Option<u64> {
        let substituted = self.source.replace('T', "t").replace('t', &t.to_string());
        let value = eval_arithmetic(&substituted)?;
        if value <= 0.0 {
            None
        } else {
            Some(value.floor() as u64)
        }
    }
}

/// Synthesizes a `Workload` by drawing prompts from `prompt_pool` (typically
/// another normalizer's `dialogs()`), launching `arrival.eval(t)` visits in
/// bucket `t` (each `bucket_seconds` long), until the arrival function
/// returns `None`. Each synthesized visit is a single literal request whose
/// text is drawn uniformly at random from the pool.
pub fn synthesize(
    prompt_pool: &[String],
    arrival: &ArrivalFunction,
    bucket_seconds: f64,
    rng: &mut impl Rng,
    opts: &NormalizeOpts,
) -> Result<Workload> {
    if prompt_pool.is_empty() {
        return Err(Error::Load("prompt pool is empty".to_string()));
    }

    let mut scheduled_visits = Vec::new();
    let mut t = 0u64;
    let mut seq = 0u64;
    while let Some(count) = arrival.eval(t) {
        for _ in 0..count {
            let prompt = &prompt_pool[rng.gen_range(0..prompt_pool.len())];
            let req = SimReq::literal(format!("synth-{seq}"), prompt.clone())
                .with_gen_params(opts.gen_params.clone());
            scheduled_visits.push(ScheduledVisit {
                start_offset: t as f64 * bucket_seconds,
                visit: Visit::new(vec![ScheduledReq { scheduled_offset: 0.0, req }]),
            });
            seq += 1;
        }
        t += 1;
    }

    let workload = postprocess(Workload::new(scheduled_visits), opts);
    workload.validate()?;
    Ok(workload)
}

/// Evaluates a whitespace-tolerant arithmetic expression of `+ - * / ( )`
/// and numeric literals using the standard recursive-descent shunting
/// sequence (term/factor), since the corpus avoids pulling in a full
/// expression-parser crate for a handful of operators.
fn eval_arithmetic(expr: &str) -> Option<f64> {
    let tokens: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut pos = 0usize;
    let value = parse_expr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return None;
    }
    Some(value)
}

fn parse_expr(tokens: &[char], pos: &mut usize) -> Option<f64> {
    let mut value = parse_term(tokens, pos)?;
    while let Some(&op) = tokens.get(*pos) {
        match op {
            '+' => {
                *pos += 1;
                value += parse_term(tokens, pos)?;
            }
            '-' => {
                *pos += 1;
                value -= parse_term(tokens, pos)?;
            }
            _ => break,
        }
    }
    Some(value)
}

fn parse_term(tokens: &[char], pos: &mut usize) -> Option<f64> {
    let mut value = parse_factor(tokens, pos)?;
    while let Some(&op) = tokens.get(*pos) {
        match op {
            '*' => {
                *pos += 1;
                value *= parse_factor(tokens, pos)?;
            }
            '/' => {
                *pos += 1;
                let divisor = parse_factor(tokens, pos)?;
                if divisor == 0.0 {
                    return None;
                }
                value /= divisor;
            }
            _ => break,
        }
    }
    Some(value)
}

fn parse_factor(tokens: &[char], pos: &mut usize) -> Option<f64> {
    match tokens.get(*pos)? {
        '(' => {
            *pos += 1;
            let value = parse_expr(tokens, pos)?;
            if tokens.get(*pos) != Some(&')') {
                return None;
            }
            *pos += 1;
            Some(value)
        }
        '-' => {
            *pos += 1;
            Some(-parse_factor(tokens, pos)?)
        }
        _ => {
            let start = *pos;
            while tokens.get(*pos).is_some_and(|c| c.is_ascii_digit() || *c == '.') {
                *pos += 1;
            }
            if *pos == start {
                return None;
            }
            tokens[start..*pos].iter().collect::<String>().parse().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_arithmetic_expressions() {
        assert!(ArrivalFunction::parse("__import__('os')").is_err());
        assert!(ArrivalFunction::parse("t if t < 5 else None").is_err());
    }

    #[test]
    fn accepts_closed_form_arithmetic() {
        assert!(ArrivalFunction::parse("2*t+1").is_ok());
        assert!(ArrivalFunction::parse("10 - t").is_ok());
    }

    #[test]
    fn rejects_empty_expression() {
        assert!(ArrivalFunction::parse("   ").is_err());
    }

    #[test]
    fn constant_function_terminates_immediately_when_non_positive() {
        let f = ArrivalFunction::parse("0").unwrap();
        assert_eq!(f.eval(0), None);
    }

    #[test]
    fn decreasing_function_eventually_terminates() {
        let f = ArrivalFunction::parse("5 - t").unwrap();
        assert_eq!(f.eval(0), Some(5));
        assert_eq!(f.eval(4), Some(1));
        assert_eq!(f.eval(5), None);
    }

    #[test]
    fn synthesize_draws_from_prompt_pool_until_function_terminates() {
        let pool = vec!["hello".to_string(), "world".to_string()];
        let arrival = ArrivalFunction::parse("3 - t").unwrap();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let wl = synthesize(&pool, &arrival, 10.0, &mut rng, &NormalizeOpts::default()).unwrap();
        assert_eq!(wl.len(), 3 + 2 + 1);
    }

    #[test]
    fn synthesize_rejects_empty_pool() {
        let arrival = ArrivalFunction::parse("1").unwrap();
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert!(synthesize(&[], &arrival, 1.0, &mut rng, &NormalizeOpts::default()).is_err());
    }
}
