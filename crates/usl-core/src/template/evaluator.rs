//! Template evaluation.

use crate::error::TemplateError;
use crate::locator::path_escape;

use super::Variables;
use super::ast::{Command, Node, Pipeline, Term};

pub(crate) fn evaluate(nodes: &[Node], vars: &dyn Variables) -> Result<String, TemplateError> {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Action(pipeline) => out.push_str(&evaluate_pipeline(pipeline, vars)?),
        }
    }
    Ok(out)
}

fn evaluate_pipeline(pipeline: &Pipeline, vars: &dyn Variables) -> Result<String, TemplateError> {
    let mut piped: Option<String> = None;

    for command in &pipeline.commands {
        let value = match command {
            Command::Value(term) => resolve(term, vars)?,
            Command::Call { function, args } => {
                let mut values = args
                    .iter()
                    .map(|term| resolve(term, vars))
                    .collect::<Result<Vec<_>, _>>()?;
                values.extend(piped.take());
                call(function, values)?
            }
        };
        piped = Some(value);
    }

    Ok(piped.unwrap_or_default())
}

fn resolve(term: &Term, vars: &dyn Variables) -> Result<String, TemplateError> {
    match term {
        Term::Variable(name) => vars
            .lookup(name)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::UnknownVariable { name: name.clone() }),
        Term::Text(text) => Ok(text.clone()),
    }
}

fn call(function: &str, args: Vec<String>) -> Result<String, TemplateError> {
    match function {
        "pathescape" => {
            let [value] = expect_args::<1>(function, args)?;
            Ok(path_escape(&value))
        }
        "lower" => {
            let [value] = expect_args::<1>(function, args)?;
            Ok(value.to_lowercase())
        }
        "upper" => {
            let [value] = expect_args::<1>(function, args)?;
            Ok(value.to_uppercase())
        }
        "pwd" => {
            let [] = expect_args::<0>(function, args)?;
            let cwd = std::env::current_dir().map_err(TemplateError::WorkingDir)?;
            Ok(cwd.to_string_lossy().into_owned())
        }
        other => Err(TemplateError::UnknownFunction {
            name: other.to_string(),
        }),
    }
}

fn expect_args<const N: usize>(
    function: &str,
    args: Vec<String>,
) -> Result<[String; N], TemplateError> {
    let got = args.len();
    args.try_into().map_err(|_| TemplateError::Arity {
        name: function.to_string(),
        expected: N,
        got,
    })
}
