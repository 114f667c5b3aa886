mod fake_process;

pub use fake_process::FakeProcessRunner;
