pub mod build_runner;
pub mod launcher;
pub mod scaffolder;
pub mod template_renderer;

pub use launcher::CommandReport;
pub use template_renderer::RenderedProject;
