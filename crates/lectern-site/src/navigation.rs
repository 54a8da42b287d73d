//! Navigation structure built from classified content.

use regex::Regex;

use lectern_pipeline::catalog::{ContentCatalog, NavItem, NavMenu, NavigationCatalog};
use lectern_pipeline::playbook::MarkdownConfig;
use lectern_pipeline::services::NavigationBuilder;

use crate::paths::{output_path, public_url};

/// Builds one menu per component, preferring an authored `nav.md` list and
/// falling back to page order.
pub struct LocalNavigationBuilder;

impl NavigationBuilder for LocalNavigationBuilder {
    fn build(
        &self,
        content: &ContentCatalog,
        _config: &MarkdownConfig,
    ) -> anyhow::Result<NavigationCatalog> {
        let mut menus = Vec::new();

        for component in content.components() {
            let nav_doc = content.nav_documents().find(|d| d.component == component);
            let items = match nav_doc {
                Some(doc) => parse_nav_items(&doc.contents),
                None => fallback_items(content, component),
            };
            menus.push(NavMenu {
                component: component.to_string(),
                items,
            });
        }

        Ok(NavigationCatalog { menus })
    }
}

/// Parse markdown list entries into navigation items. One level of
/// indentation nests under the preceding top-level entry.
fn parse_nav_items(markdown: &str) -> Vec<NavItem> {
    // Pattern is tiny and the nav document is parsed once per run.
    let link = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("nav link pattern");
    let mut items: Vec<NavItem> = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("* ") && !trimmed.starts_with("- ") {
            continue;
        }
        let Some(caps) = link.captures(trimmed) else {
            continue;
        };

        let item = NavItem {
            title: caps[1].to_string(),
            url: caps[2].to_string(),
            children: Vec::new(),
        };

        let indented = line.len() > trimmed.len();
        match items.last_mut() {
            Some(parent) if indented => parent.children.push(item),
            _ => items.push(item),
        }
    }

    items
}

/// Without an authored nav document, list the component's pages ordered by
/// frontmatter `order`, then stem.
fn fallback_items(content: &ContentCatalog, component: &str) -> Vec<NavItem> {
    let mut docs: Vec<_> = content
        .pages()
        .filter(|d| d.component == component)
        .collect();
    docs.sort_by_key(|d| (d.frontmatter.order.unwrap_or(u32::MAX), d.stem.clone()));

    docs.into_iter()
        .map(|d| NavItem {
            title: d
                .frontmatter
                .title
                .clone()
                .unwrap_or_else(|| d.stem.clone()),
            url: public_url(&output_path(&d.component, &d.stem)),
            children: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_pipeline::catalog::{ClassifiedDocument, DocumentFamily, Frontmatter};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn doc(
        component: &str,
        stem: &str,
        family: DocumentFamily,
        contents: &str,
        order: Option<u32>,
    ) -> ClassifiedDocument {
        ClassifiedDocument {
            component: component.to_string(),
            version: "latest".to_string(),
            family,
            stem: stem.to_string(),
            relative_path: PathBuf::from(format!("{stem}.md")),
            contents: contents.to_string(),
            frontmatter: Frontmatter {
                order,
                ..Default::default()
            },
        }
    }

    #[test]
    fn authored_nav_wins_over_fallback() {
        let catalog = ContentCatalog::new(vec![
            doc(
                "ROOT",
                "nav",
                DocumentFamily::Nav,
                "* [Start](/index.html)\n  * [Install](/install.html)\n* [FAQ](/faq.html)\n",
                None,
            ),
            doc("ROOT", "zzz", DocumentFamily::Page, "", None),
        ]);

        let navigation = LocalNavigationBuilder
            .build(&catalog, &MarkdownConfig::default())
            .unwrap();

        let menu = navigation.menu_for("ROOT").unwrap();
        assert_eq!(menu.items.len(), 2);
        assert_eq!(menu.items[0].title, "Start");
        assert_eq!(menu.items[0].children[0].title, "Install");
        assert_eq!(menu.items[1].url, "/faq.html");
    }

    #[test]
    fn fallback_orders_by_frontmatter_then_stem() {
        let catalog = ContentCatalog::new(vec![
            doc("guide", "zeta", DocumentFamily::Page, "", Some(1)),
            doc("guide", "alpha", DocumentFamily::Page, "", None),
            doc("guide", "beta", DocumentFamily::Page, "", None),
        ]);

        let navigation = LocalNavigationBuilder
            .build(&catalog, &MarkdownConfig::default())
            .unwrap();

        let titles: Vec<_> = navigation
            .menu_for("guide")
            .unwrap()
            .items
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["zeta", "alpha", "beta"]);
    }

    #[test]
    fn one_menu_per_component() {
        let catalog = ContentCatalog::new(vec![
            doc("ROOT", "index", DocumentFamily::Page, "", None),
            doc("guide", "install", DocumentFamily::Page, "", None),
        ]);

        let navigation = LocalNavigationBuilder
            .build(&catalog, &MarkdownConfig::default())
            .unwrap();

        assert_eq!(navigation.menus.len(), 2);
        assert!(navigation.menu_for("ROOT").is_some());
        assert!(navigation.menu_for("guide").is_some());
        assert!(navigation.menu_for("missing").is_none());
    }
}
