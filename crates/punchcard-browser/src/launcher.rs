use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

const DEFAULT_DEBUGGING_PORT: u16 = 9222;

/// Manages the Chrome process used for a reporting session.
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    initial_url: Option<String>,
    headless: bool,
    debugging_port: u16,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, initial_url: Option<String>) -> Self {
        Self {
            chrome_path,
            profile_path,
            initial_url,
            headless: false,
            debugging_port: DEFAULT_DEBUGGING_PORT,
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Launch the Chrome process.
    pub fn launch(&self) -> Result<Child> {
        let args = self.build_args();

        Command::new(&self.chrome_path)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    /// Build Chrome command-line arguments.
    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.profile_path.display()),
        ];

        if self.headless {
            args.push("--headless=new".to_string());
        }

        // Open directly on the initial page, with a proper scheme
        if let Some(url) = &self.initial_url {
            let url = if !url.starts_with("http://") && !url.starts_with("https://") {
                format!("https://{}", url)
            } else {
                url.clone()
            };
            args.push(url);
        } else {
            args.push("about:blank".to_string());
        }

        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher(initial_url: Option<String>) -> ChromeLauncher {
        ChromeLauncher::new(
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/tmp/profile"),
            initial_url,
        )
    }

    #[test]
    fn test_launcher_builds_debugging_args() {
        let args = launcher(Some("https://app.meckano.co.il/login.php#login".to_string()))
            .build_args();

        assert!(args.contains(&"--remote-debugging-port=9222".to_string()));
        assert!(args.contains(&"--no-first-run".to_string()));
        assert!(args.contains(&"--no-default-browser-check".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-data-dir=")));
        assert!(args.contains(&"https://app.meckano.co.il/login.php#login".to_string()));
    }

    #[test]
    fn test_launcher_prefixes_bare_hosts_with_https() {
        let args = launcher(Some("app.meckano.co.il".to_string())).build_args();
        assert!(args.contains(&"https://app.meckano.co.il".to_string()));
    }

    #[test]
    fn test_launcher_defaults_to_blank_page() {
        let args = launcher(None).build_args();
        assert!(args.contains(&"about:blank".to_string()));
    }

    #[test]
    fn test_launcher_headless_flag() {
        let args = launcher(None).headless(true).build_args();
        assert!(args.contains(&"--headless=new".to_string()));

        let args = launcher(None).build_args();
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }
}
