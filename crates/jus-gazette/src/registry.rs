//! In-memory gazette site registry.

use crate::{
    definition::GazetteSite,
    error::{GazetteError, Result},
    loader::GazetteLoader,
};
use jus_core::{SiteId, StateCode};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// (id, state, label, url, selector) for the built-in state gazettes.
const BUILTIN_SITES: [(&str, &str, &str, &str, &str); 10] = [
    (
        "dje-sp",
        "SP",
        "DJE-SP",
        "https://dje.tjsp.jus.br/cdje/index.do",
        "div.conteudo, table.resultTable",
    ),
    (
        "dje-rj",
        "RJ",
        "DJE-RJ",
        "https://www3.tjrj.jus.br/consultadje/",
        "div#conteudo, div.publicacao",
    ),
    (
        "dje-mg",
        "MG",
        "DJE-MG",
        "https://www.tjmg.jus.br/portal-tjmg/diario-do-judiciario/",
        "div.conteudo-pagina, article",
    ),
    (
        "dje-rs",
        "RS",
        "DJE-RS",
        "https://www.tjrs.jus.br/novo/diario-da-justica/",
        "div.entry-content, article",
    ),
    (
        "dje-pr",
        "PR",
        "DJE-PR",
        "https://portal.tjpr.jus.br/e-dj/publico/diario/pesquisar.do",
        "div.resultado, table.resultTable",
    ),
    (
        "dje-sc",
        "SC",
        "DJE-SC",
        "https://busca.tjsc.jus.br/dje-consulta/",
        "div.resultado, div.publicacao",
    ),
    (
        "dje-ba",
        "BA",
        "DJE-BA",
        "https://diario.tjba.jus.br/diario/internet/pesquisar.wsp",
        "div.conteudo, table",
    ),
    (
        "dje-go",
        "GO",
        "DJE-GO",
        "https://www.tjgo.jus.br/index.php/processos/dj-eletronico",
        "div.item-page, article",
    ),
    (
        "dje-pe",
        "PE",
        "DJE-PE",
        "https://www.tjpe.jus.br/dje/djeletronico",
        "div.journal-content-article, div.conteudo",
    ),
    (
        "dje-df",
        "DF",
        "DJE-DF",
        "https://dje.tjdft.jus.br/dje/djeletronico",
        "div.conteudo, div#resultado",
    ),
];

/// Ordered registry of gazette sites. Registry order is scan order.
#[derive(Clone)]
pub struct GazetteRegistry {
    sites: Arc<RwLock<Vec<GazetteSite>>>,
}

impl GazetteRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sites: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Registry holding the ten built-in state gazettes.
    #[must_use]
    pub fn builtin() -> Self {
        let sites = BUILTIN_SITES
            .iter()
            .map(|(id, state, label, url, selector)| GazetteSite {
                id: SiteId::new(*id).expect("valid built-in site ID"),
                state: StateCode::new(state).expect("valid built-in state"),
                label: (*label).to_string(),
                url: (*url).to_string(),
                selector: (*selector).to_string(),
            })
            .collect();

        Self {
            sites: Arc::new(RwLock::new(sites)),
        }
    }

    /// Create a registry and load all definitions from the given loader.
    ///
    /// # Errors
    /// Returns error if loading fails.
    pub fn load_from(loader: &GazetteLoader) -> Result<Self> {
        let registry = Self::new();
        registry.reload(loader)?;
        Ok(registry)
    }

    /// Replace the current sites with freshly loaded definitions.
    pub fn reload(&self, loader: &GazetteLoader) -> Result<()> {
        let mut definitions = loader.load_all()?;
        definitions.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        definitions.dedup_by(|a, b| a.id == b.id);

        let mut sites = self.sites.write().expect("acquire write lock on sites");
        *sites = definitions;

        info!(count = sites.len(), "reloaded gazette definitions");

        Ok(())
    }

    /// Get a site by ID.
    pub fn get(&self, site_id: &SiteId) -> Result<GazetteSite> {
        let sites = self.sites.read().expect("acquire read lock on sites");

        sites
            .iter()
            .find(|site| &site.id == site_id)
            .cloned()
            .ok_or_else(|| GazetteError::NotFound {
                site_id: site_id.to_string(),
            })
    }

    /// Get all sites in registry order.
    #[must_use]
    pub fn get_all(&self) -> Vec<GazetteSite> {
        self.sites
            .read()
            .expect("acquire read lock on sites")
            .clone()
    }

    /// Sites whose state is in `states`, in registry order.
    ///
    /// An empty filter selects every site.
    #[must_use]
    pub fn filter_by_states(&self, states: &[StateCode]) -> Vec<GazetteSite> {
        let sites = self.sites.read().expect("acquire read lock on sites");

        sites
            .iter()
            .filter(|site| states.is_empty() || states.contains(&site.state))
            .cloned()
            .collect()
    }

    /// Distinct states covered, in registry order.
    #[must_use]
    pub fn states(&self) -> Vec<StateCode> {
        let sites = self.sites.read().expect("acquire read lock on sites");

        let mut states: Vec<StateCode> = Vec::new();
        for site in sites.iter() {
            if !states.contains(&site.state) {
                states.push(site.state.clone());
            }
        }
        states
    }

    /// Get the total number of sites in the registry.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sites.read().expect("acquire read lock on sites").len()
    }

    /// Add a site, or replace the one with the same ID in place.
    pub fn insert(&self, site: GazetteSite) -> Result<()> {
        site.validate()?;

        let mut sites = self.sites.write().expect("acquire write lock on sites");

        let site_id = site.id.clone();
        if let Some(existing) = sites.iter_mut().find(|s| s.id == site.id) {
            *existing = site;
        } else {
            sites.push(site);
        }

        debug!(site_id = %site_id, "inserted gazette site");

        Ok(())
    }

    /// Remove a site. Returns `true` if it was present.
    pub fn remove(&self, site_id: &SiteId) -> bool {
        let mut sites = self.sites.write().expect("acquire write lock on sites");

        let before = sites.len();
        sites.retain(|site| &site.id != site_id);
        let removed = sites.len() != before;

        if removed {
            debug!(site_id = %site_id, "removed gazette site");
        }

        removed
    }
}

impl Default for GazetteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
