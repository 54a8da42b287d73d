//! Page composition with minijinja templates.

use std::collections::HashMap;

use anyhow::Context as _;
use minijinja::value::Value;
use minijinja::{context, Environment};

use lectern_pipeline::catalog::{ContentCatalog, NavItem, NavigationCatalog, Page, UiCatalog};
use lectern_pipeline::playbook::Playbook;
use lectern_pipeline::services::{PageComposer, PageComposerFactory};

/// Builds a composer bound to the playbook's site settings and the loaded
/// UI templates.
pub struct LocalComposerFactory;

impl PageComposerFactory for LocalComposerFactory {
    fn create(
        &self,
        playbook: &Playbook,
        _content: &ContentCatalog,
        ui: &UiCatalog,
        _env: &HashMap<String, String>,
    ) -> anyhow::Result<Box<dyn PageComposer>> {
        let mut environment = Environment::new();
        for (name, source) in &ui.templates {
            environment
                .add_template_owned(name.clone(), source.clone())
                .with_context(|| format!("invalid ui template {name}"))?;
        }

        Ok(Box::new(TemplateComposer {
            environment,
            site_title: playbook.site.title.clone(),
            site_url: playbook.site.url.clone(),
        }))
    }
}

struct TemplateComposer {
    environment: Environment<'static>,
    site_title: String,
    site_url: Option<String>,
}

impl PageComposer for TemplateComposer {
    fn compose(
        &self,
        page: &mut Page,
        _content: &ContentCatalog,
        navigation: Option<&NavigationCatalog>,
    ) -> anyhow::Result<()> {
        // The converted body becomes template input; the composed document
        // replaces it in place.
        let body = page.contents.take().unwrap_or_default();

        let menu = navigation.and_then(|nav| {
            page.src
                .origin
                .as_deref()
                .and_then(|component| nav.menu_for(component))
        });
        let menu_items = match menu {
            Some(menu) => nav_value(&menu.items),
            None => nav_value(&[]),
        };

        let template = self
            .environment
            .get_template("page.html")
            .context("ui bundle has no page.html template")?;
        let html = template.render(context! {
            title => &page.title,
            site_title => &self.site_title,
            site_url => self
                .site_url
                .as_ref()
                .map(|url| Value::from_safe_string(url.clone())),
            content => body,
            nav => menu_items,
            url => Value::from_safe_string(page.publish.url.clone()),
            root_path => Value::from_safe_string(page.publish.root_path.clone()),
        })?;

        page.contents = Some(html);
        Ok(())
    }
}

/// Navigation items as template values. Templates named `*.html` are
/// auto-escaped, so URL fields must be marked safe to come through raw;
/// titles stay escapable text.
fn nav_value(items: &[NavItem]) -> Value {
    Value::from_iter(items.iter().map(|item| {
        context! {
            title => &item.title,
            url => Value::from_safe_string(item.url.clone()),
            children => nav_value(&item.children),
        }
    }))
}
