// Defines the `workstation.yaml` configuration file.
//
// Every field is optional: an empty (or missing) file yields exactly the
// built-in tool set, so the config only exists to override names, lists
// and paths. The `Default` impls below are the single place those built-in
// values live.

use serde::{Deserialize, Serialize};

/// What the pipeline does when an ensurer fails with a non-halting error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and carry on with the next ensurer.
    #[default]
    Continue,
    /// Stop at the first failed ensurer.
    Abort,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkstationConfig {
    pub on_failure: FailurePolicy,
    /// Shell profile that receives PATH exports (tilde-expanded on load).
    pub shell_profile: String,
    pub homebrew: HomebrewConfig,
    pub python: PythonConfig,
    pub node: NodeConfig,
    pub npm: NpmConfig,
    pub powershell: PowerShellConfig,
    pub azure_cli: AzureCliConfig,
    pub terraform: TappedFormulaConfig,
    pub terraform_docs: TappedFormulaConfig,
}

impl Default for WorkstationConfig {
    fn default() -> Self {
        WorkstationConfig {
            on_failure: FailurePolicy::default(),
            shell_profile: "~/.zprofile".to_string(),
            homebrew: HomebrewConfig::default(),
            python: PythonConfig::default(),
            node: NodeConfig::default(),
            npm: NpmConfig::default(),
            powershell: PowerShellConfig::default(),
            azure_cli: AzureCliConfig::default(),
            terraform: TappedFormulaConfig {
                tap: "hashicorp/tap".to_string(),
                formula: "hashicorp/tap/terraform".to_string(),
            },
            terraform_docs: TappedFormulaConfig {
                tap: "terraform-docs/tap".to_string(),
                formula: "terraform-docs/tap/terraform-docs".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomebrewConfig {
    /// Official installer, run through `/bin/bash -c "$(curl -fsSL <url>)"`.
    pub install_script_url: String,
    pub disable_analytics: bool,
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        HomebrewConfig {
            install_script_url: "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh"
                .to_string(),
            disable_analytics: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    pub formula: String,
    pub executable: String,
    /// Packaging tools upgraded right after the runtime is in place.
    pub bootstrap_packages: Vec<String>,
}

impl Default for PythonConfig {
    fn default() -> Self {
        PythonConfig {
            formula: "python".to_string(),
            executable: "python3".to_string(),
            bootstrap_packages: vec![
                "pip".to_string(),
                "setuptools".to_string(),
                "wheel".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub formula: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            formula: "node".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpmConfig {
    /// Global packages, in install order. Entries may carry a version (`pkg@4`).
    pub packages: Vec<String>,
}

impl Default for NpmConfig {
    fn default() -> Self {
        NpmConfig {
            packages: vec![
                "typescript".to_string(),
                "azure-functions-core-tools@4".to_string(),
                "@azure/static-web-apps-cli".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerShellConfig {
    pub cask: String,
    /// Binary embedded in the app bundle, linked onto PATH when `pwsh` is not resolvable.
    pub app_binary: String,
    pub link_dir: String,
    /// Module repository marked as trusted before touching modules.
    pub repository: String,
    pub module: String,
}

impl Default for PowerShellConfig {
    fn default() -> Self {
        PowerShellConfig {
            cask: "powershell".to_string(),
            app_binary: "/Applications/PowerShell.app/Contents/MacOS/pwsh".to_string(),
            link_dir: "/usr/local/bin".to_string(),
            repository: "PSGallery".to_string(),
            module: "Az".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureCliConfig {
    pub formula: String,
    pub extensions: Vec<String>,
}

impl Default for AzureCliConfig {
    fn default() -> Self {
        AzureCliConfig {
            formula: "azure-cli".to_string(),
            extensions: Vec::new(),
        }
    }
}

/// A formula that lives in a third-party tap which must be registered first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TappedFormulaConfig {
    pub tap: String,
    pub formula: String,
}
