//! Interactive fallback when no source is given on the command line.
//!
//! Questions are written to `out` and answers read line by line from
//! `input`; a blank answer keeps the shown default.
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use bmpro::core::params::{ContourParams, FloodFillParams, LineParams, PipelineParams};

use super::errors::AppError;

pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Returns `None` on a blank answer or closed input.
    fn read_answer(&mut self, question: &str, default: Option<&str>) -> Result<Option<String>, AppError> {
        match default {
            Some(d) => write!(self.out, "{} [{}]: ", question, d)?,
            None => write!(self.out, "{}: ", question)?,
        }
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    pub fn ask_required(&mut self, question: &str) -> Result<String, AppError> {
        self.read_answer(question, None)?
            .ok_or_else(|| AppError::EndOfInput {
                question: question.to_string(),
            })
    }

    pub fn ask<T>(&mut self, question: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr + Display,
    {
        let shown = default.to_string();
        match self.read_answer(question, Some(&shown))? {
            None => Ok(default),
            Some(answer) => answer.parse().map_err(|_| AppError::InvalidAnswer {
                question: question.to_string(),
                answer,
            }),
        }
    }

    pub fn ask_bool(&mut self, question: &str, default: bool) -> Result<bool, AppError> {
        let shown = if default { "y" } else { "n" };
        let Some(answer) = self.read_answer(question, Some(shown))? else {
            return Ok(default);
        };
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(true),
            "n" | "no" | "false" | "0" => Ok(false),
            _ => Err(AppError::InvalidAnswer {
                question: question.to_string(),
                answer,
            }),
        }
    }

    /// Ask for the source bitmap and every pipeline knob, starting from `params`.
    pub fn ask_pipeline(&mut self, params: &mut PipelineParams) -> Result<PathBuf, AppError> {
        let input = PathBuf::from(self.ask_required("Source bitmap path")?);

        params.scale = self.ask("Resample scale", params.scale)?;
        params.tint_inverse = self.ask_bool("Apply inverse tint", params.tint_inverse)?;
        params.blur = self.ask_bool("Apply blur", params.blur)?;
        params.sepia = self.ask_bool("Apply sepia", params.sepia)?;

        if self.ask_bool("Flood fill a region", params.fill.is_some())? {
            let base = params.fill.unwrap_or_default();
            params.fill = Some(FloodFillParams {
                tolerance: self.ask("Fill tolerance", base.tolerance)?,
                seed: (
                    self.ask("Seed row", base.seed.0)?,
                    self.ask("Seed column", base.seed.1)?,
                ),
            });
        } else {
            params.fill = None;
        }

        if self.ask_bool("Extract contour", params.contour.is_some())? {
            let base = params.contour.unwrap_or_default();
            params.contour = Some(ContourParams {
                tolerance: self.ask("Contour tolerance", base.tolerance)?,
                suppress_radius: self.ask("Suppression radius", base.suppress_radius)?,
            });
        } else {
            params.contour = None;
        }

        if self.ask_bool("Detect lines", params.lines.is_some())? {
            let base = params.lines.unwrap_or_default();
            params.lines = Some(LineParams {
                max_gap_run: self.ask("Max gap run", base.max_gap_run)?,
                search_radius: self.ask("Search radius", base.search_radius)?,
                min_line_length: self.ask("Min line length", base.min_line_length)?,
            });
        } else {
            params.lines = None;
        }

        params.report = self.ask_bool("Write JSON report", params.report)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(answers: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(answers.as_bytes(), Vec::new())
    }

    #[test]
    fn blank_answers_keep_defaults() {
        let mut p = prompter("\n\n");
        assert_eq!(p.ask("Scale", 2.0f64).unwrap(), 2.0);
        assert!(p.ask_bool("Blur", true).unwrap());
        let shown = String::from_utf8(p.out).unwrap();
        assert_eq!(shown, "Scale [2]: Blur [y]: ");
    }

    #[test]
    fn bad_answers_are_reported() {
        let mut p = prompter("abc\nmaybe\n");
        assert!(matches!(
            p.ask("Scale", 2.0f64),
            Err(AppError::InvalidAnswer { .. })
        ));
        assert!(matches!(
            p.ask_bool("Blur", false),
            Err(AppError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn closed_input_fails_required_questions() {
        let mut p = prompter("");
        assert!(matches!(
            p.ask_required("Source bitmap path"),
            Err(AppError::EndOfInput { .. })
        ));
    }

    #[test]
    fn full_session_builds_params() {
        // path, scale, tint, blur, sepia, fill?, tol, row, col, contour?, lines?, gap, radius, len, report
        let answers = "in.bmp\n1\nn\ny\n\ny\n5\n2\n3\nn\nyes\n2\n0\n4\ny\n";
        let mut params = PipelineParams::default();
        let input = prompter(answers).ask_pipeline(&mut params).unwrap();

        assert_eq!(input, PathBuf::from("in.bmp"));
        assert_eq!(params.scale, 1.0);
        assert!(params.blur && !params.sepia && !params.tint_inverse);
        assert_eq!(
            params.fill,
            Some(FloodFillParams {
                tolerance: 5,
                seed: (2, 3)
            })
        );
        assert!(params.contour.is_none());
        assert_eq!(
            params.lines,
            Some(LineParams {
                max_gap_run: 2,
                search_radius: 0,
                min_line_length: 4
            })
        );
        assert!(params.report);
    }
}
