use std::io::{self, Write};

/// Collects case results and renders them as TAP (Test Anything Protocol) v14.
#[derive(Debug, Default)]
pub struct Tap {
    points: Vec<TestPoint>,
}

#[derive(Debug)]
struct TestPoint {
    ok: bool,
    desc: String,
    diagnostics: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(&mut self, desc: impl Into<String>) {
        self.points.push(TestPoint {
            ok: true,
            desc: desc.into(),
            diagnostics: None,
        });
    }

    pub fn not_ok(&mut self, desc: impl Into<String>, diagnostics: impl Into<String>) {
        self.points.push(TestPoint {
            ok: false,
            desc: desc.into(),
            diagnostics: Some(diagnostics.into()),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.points.iter().filter(|t| !t.ok).count()
    }

    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "TAP version 14")?;
        writeln!(out, "1..{}", self.points.len())?;
        for (i, t) in self.points.iter().enumerate() {
            let status = if t.ok { "ok" } else { "not ok" };
            writeln!(out, "{} {} - {}", status, i + 1, t.desc)?;
            if let Some(diag) = &t.diagnostics {
                for line in diag.lines() {
                    writeln!(out, "  # {}", line)?;
                }
            }
        }
        let failed = self.failure_count();
        writeln!(out, "# tests {}", self.points.len())?;
        writeln!(out, "# pass  {}", self.points.len() - failed)?;
        writeln!(out, "# fail  {}", failed)
    }
}
