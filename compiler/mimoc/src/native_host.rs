//! Host backed by the operating system.

use std::fs;

use mimo_eval::{Host, HostError, HttpRequest, HttpResponse};

/// Real filesystem, process environment, blocking HTTP via `ureq`, and
/// `std::process::exit`.
#[derive(Clone, Debug, Default)]
pub struct NativeHost {
    args: Vec<String>,
}

impl NativeHost {
    /// `args` are the script arguments, without interpreter or script path.
    pub fn new(args: Vec<String>) -> Self {
        NativeHost { args }
    }
}

impl Host for NativeHost {
    fn read_file(&self, path: &str) -> Result<String, HostError> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_file(&self, path: &str, contents: &str) -> Result<(), HostError> {
        Ok(fs::write(path, contents)?)
    }

    fn exists(&self, path: &str) -> bool {
        fs::metadata(path).is_ok()
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, HostError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn make_dir(&self, path: &str, recursive: bool) -> Result<(), HostError> {
        if recursive {
            fs::create_dir_all(path)?;
        } else {
            fs::create_dir(path)?;
        }
        Ok(())
    }

    fn remove_file(&self, path: &str) -> Result<(), HostError> {
        Ok(fs::remove_file(path)?)
    }

    fn remove_dir(&self, path: &str, recursive: bool) -> Result<(), HostError> {
        if recursive {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_dir(path)?;
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(method = %request.method, url = %request.url))]
    fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, HostError> {
        let mut req = ureq::request(&request.method, &request.url);
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }
        let result = match &request.body {
            Some(body) => req.send_string(body),
            None => req.call(),
        };
        // Error statuses still carry a response the script can inspect.
        let response = match result {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(HostError::Http(e.to_string())),
        };
        let status = response.status();
        let body = response.into_string()?;
        tracing::debug!(status, "response received");
        Ok(HttpResponse { status, body })
    }

    fn arguments(&self) -> Vec<String> {
        self.args.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn env_vars(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = std::env::vars().collect();
        vars.sort();
        vars
    }

    fn exit(&self, code: i32) -> Result<(), HostError> {
        std::process::exit(code)
    }

    fn cwd(&self) -> String {
        std::env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|_| ".".to_string())
    }
}

#[cfg(test)]
mod tests;
