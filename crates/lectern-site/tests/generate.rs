//! End-to-end site generation against the local services.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lectern_pipeline::playbook::GenerateArgs;
use lectern_pipeline::generate_site;
use lectern_site::LocalServices;
use tempfile::tempdir;

fn write_docs(docs: &Path) {
    fs::create_dir_all(docs).unwrap();
    fs::write(
        docs.join("index.md"),
        "---\ntitle: Home\n---\n# Welcome\n\n```jsl\nentity Person {\n  @Required field name : string;\n}\n```\n",
    )
    .unwrap();
    fs::write(
        docs.join("install.md"),
        "---\ntitle: Install\naliases: [setup]\n---\n# Install\n\nRun the installer.\n",
    )
    .unwrap();
    fs::write(
        docs.join("nav.md"),
        "* [Home](/index.html)\n* [Install](/install.html)\n",
    )
    .unwrap();
}

async fn generate(docs: &Path, out: &Path, url: Option<&str>) {
    let args = GenerateArgs {
        output_dir: Some(out.to_path_buf()),
        site_url: url.map(str::to_string),
        site_title: Some("Handbook".to_string()),
        sources: vec![docs.to_path_buf()],
        ..Default::default()
    };

    generate_site(&args, &HashMap::new(), LocalServices::create())
        .await
        .unwrap();
}

#[tokio::test]
async fn generates_a_complete_site() {
    let temp = tempdir().unwrap();
    let docs = temp.path().join("docs");
    let out = temp.path().join("site");
    write_docs(&docs);

    generate(&docs, &out, Some("https://docs.example.com")).await;

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("<title>Home - Handbook</title>"));
    assert!(index.contains(r#"<span class="hljs-keyword">entity</span>"#));
    assert!(index.contains(r#"<span class="hljs-meta">@Required</span>"#));
    assert!(index.contains(r#"<a href="/install.html">Install</a>"#));

    // Redirect stub from the `setup` alias.
    let redirect = fs::read_to_string(out.join("setup.html")).unwrap();
    assert!(redirect.contains("url=/install.html"));

    // Search index, sitemap, 404 page, and UI assets.
    let search = fs::read_to_string(out.join("search-index.json")).unwrap();
    assert!(search.contains("\"/install.html\""));
    assert!(search.contains("Run the installer."));

    let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://docs.example.com/index.html</loc>"));

    let not_found = fs::read_to_string(out.join("404.html")).unwrap();
    assert!(not_found.contains("Page Not Found"));

    assert!(out.join("_/site.css").exists());
}

#[tokio::test]
async fn no_url_means_no_not_found_page() {
    let temp = tempdir().unwrap();
    let docs = temp.path().join("docs");
    let out = temp.path().join("site");
    write_docs(&docs);

    generate(&docs, &out, None).await;

    assert!(!out.join("404.html").exists());
    assert!(!out.join("sitemap.xml").exists());
    // The search index is part of every run.
    assert!(out.join("search-index.json").exists());
}

#[tokio::test]
async fn environment_can_supply_the_site_url() {
    let temp = tempdir().unwrap();
    let docs = temp.path().join("docs");
    let out = temp.path().join("site");
    write_docs(&docs);

    let args = GenerateArgs {
        output_dir: Some(out.clone()),
        sources: vec![docs],
        ..Default::default()
    };
    let env = HashMap::from([(
        "LECTERN_SITE_URL".to_string(),
        "https://env.example.com".to_string(),
    )]);

    generate_site(&args, &env, LocalServices::create())
        .await
        .unwrap();

    assert!(out.join("404.html").exists());
}
