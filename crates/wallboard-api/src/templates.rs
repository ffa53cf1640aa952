use anyhow::{Context as _, Result};
use tera::{Context, Tera};

pub const INDEX: &str = "index.html";
pub const NEW: &str = "new.html";
pub const SHOW: &str = "show.html";

/// Template registry: view name + named values in, HTML out.
/// Templates are embedded at compile time so the binary runs from any
/// working directory.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn load() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates([
            (INDEX, include_str!("../templates/index.html")),
            (NEW, include_str!("../templates/new.html")),
            (SHOW, include_str!("../templates/show.html")),
        ])
        .context("Failed to compile templates")?;

        Ok(Self { tera })
    }

    pub fn render(&self, view: &str, ctx: &Context) -> Result<String> {
        self.tera
            .render(view, ctx)
            .with_context(|| format!("Failed to render {view}"))
    }
}
