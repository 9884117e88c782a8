//! Sample catalogues and on-disk catalogue directories for tests.
//!
//! The English table is complete; the Chinese table deliberately lacks
//! `about`, `common.v2rayCoreStatus`, `welcome.docker`,
//! `setting.messages.gfwlist`, `axios.messages.noBackendFound`, and the
//! later positions of `customRouting.messages`, mirroring how translations
//! trail the source language.

use std::io::Write as _;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::{Value, json};
use tempfile::TempDir;

/// English catalogue tree.
#[must_use]
pub fn english() -> Value {
    json!({
        "about": "<p>v2rayA is a web GUI client of V2Ray.</p><p class=\"about-small\">Default ports:</p>",
        "common": {
            "setting": "Setting",
            "about": "About",
            "loggedAs": "Logged as <b>{username}</b>",
            "v2rayCoreStatus": "Status of v2ray-core"
        },
        "welcome": {
            "title": "Welcome",
            "docker": "v2rayA is running in Docker. Version: {version}",
            "messages": [
                "There is no server.",
                "You can create a server or import a subscription."
            ]
        },
        "v2ray": {
            "start": "Start",
            "stop": "Stop"
        },
        "setting": {
            "messages": {
                "gfwlist": "Based on modified time of file which sometimes is after latest version online."
            }
        },
        "customRouting": {
            "title": "Customize Routing Rule",
            "messages": {
                "0": "v2rayA will recognize all SiteDat file in <b>{V2RayLocationAsset}</b>",
                "1": "To make a SiteDat file by yourself: <a href=\"https://github.com/ToutyRater/V2Ray-SiteDAT\">ToutyRater/V2Ray-SiteDAT</a>",
                "2": "Multi-select is supported.",
                "noSiteDatFileFound": "No siteDat file found in {V2RayLocationAsset}",
                "emptyRuleNotPermitted": "Empty rule is not permitted"
            }
        },
        "axios": {
            "messages": {
                "noBackendFound": "Cannot find v2rayA at {url}. Make sure v2rayA is running at this address.",
                "cannotCommunicate": [
                    "Cannot communicate. The browser may not allow https sites to access http resources.",
                    "Cannot communicate. Firefox does not allow https sites to access http resources."
                ]
            }
        }
    })
}

/// Partial Chinese catalogue tree.
#[must_use]
pub fn chinese() -> Value {
    json!({
        "common": {
            "setting": "设置",
            "about": "关于",
            "loggedAs": "正在以 <b>{username}</b> 的身份登录"
        },
        "welcome": {
            "title": "初来乍到，请多关照",
            "messages": [
                "我们发现你还没有创建或导入任何节点、订阅。",
                "我们支持以vmess、ss、ssr地址，或者订阅地址的方式导入。"
            ]
        },
        "v2ray": {
            "start": "启动",
            "stop": "关闭"
        },
        "customRouting": {
            "title": "自定义路由规则",
            "messages": {
                "0": "v2rayA将识别 <b>{V2RayLocationAsset}</b> 中的所有SiteDat文件",
                "noSiteDatFileFound": "在 {V2RayLocationAsset} 中未找到siteDat文件"
            }
        },
        "axios": {
            "messages": {
                "cannotCommunicate": [
                    "无法通信。当前浏览器可能不允许https站点访问http资源。",
                    "无法通信。火狐浏览器不允许https站点访问http资源。"
                ]
            }
        }
    })
}

/// Writes each `(file name, contents)` pair into a fresh temporary directory.
///
/// The returned [`TempDir`] must be kept alive for as long as the files are
/// needed.
///
/// # Errors
///
/// Returns an error when the directory cannot be created, its path is not
/// UTF-8, or a file cannot be written.
pub fn catalog_dir(files: &[(&str, &str)]) -> Result<(TempDir, Utf8PathBuf)> {
    let temp = TempDir::new().context("create catalogue directory")?;
    let path = Utf8Path::from_path(temp.path())
        .ok_or_else(|| anyhow!("temporary directory path is not valid UTF-8"))?
        .to_path_buf();
    let dir = Dir::open_ambient_dir(&path, ambient_authority())
        .context("open catalogue directory with cap-std")?;
    for (name, contents) in files {
        let mut file = dir.create(name).with_context(|| format!("create {name}"))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("write {name}"))?;
    }
    Ok((temp, path))
}

/// Writes `en.json` and `zh.json` from [`english`] and [`chinese`].
///
/// # Errors
///
/// Returns an error when serialisation or writing fails.
pub fn sample_catalog_dir() -> Result<(TempDir, Utf8PathBuf)> {
    let en = serde_json::to_string_pretty(&english()).context("serialise english")?;
    let zh = serde_json::to_string_pretty(&chinese()).context("serialise chinese")?;
    catalog_dir(&[("en.json", en.as_str()), ("zh.json", zh.as_str())])
}
