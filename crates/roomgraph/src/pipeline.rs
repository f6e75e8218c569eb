//! End-to-end runs over a working directory.
//!
//! Files, relative to the working directory:
//! - `region_map.json`: region name -> location slugs
//! - `region_color_map.json`: region name -> fill color (optional, user provided)
//! - `<condition>/crawl_data.json`: the crawl document
//! - `<condition>/*.svg`, `<condition>/elements.json`: drawings (`render` feature)

use roomgraph_core::{
    Condition, CrawlConfig, CrawlDocument, PageSource, RegionIndex, build_region_index, crawl,
};
use std::path::{Path, PathBuf};
use tracing::info;

pub const REGION_MAP_FILE: &str = "region_map.json";
pub const REGION_COLOR_MAP_FILE: &str = "region_color_map.json";
pub const CRAWL_DATA_FILE: &str = "crawl_data.json";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] roomgraph_core::Error),
    #[cfg(feature = "render")]
    #[error(transparent)]
    Render(#[from] roomgraph_render::Error),
    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] crate::render::raster::RasterError),
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Paths of the files a run reads and writes.
#[derive(Debug, Clone)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn region_map_path(&self) -> PathBuf {
        self.root.join(REGION_MAP_FILE)
    }

    pub fn color_map_path(&self) -> PathBuf {
        self.root.join(REGION_COLOR_MAP_FILE)
    }

    pub fn condition_dir(&self, condition: Condition) -> PathBuf {
        self.root.join(condition.name())
    }

    pub fn crawl_data_path(&self, condition: Condition) -> PathBuf {
        self.condition_dir(condition).join(CRAWL_DATA_FILE)
    }

    fn ensure_dir(path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_regions(&self) -> Result<RegionIndex> {
        Ok(RegionIndex::load(&self.region_map_path())?)
    }

    pub fn load_crawl(&self, condition: Condition) -> Result<CrawlDocument> {
        Ok(CrawlDocument::load(&self.crawl_data_path(condition))?)
    }
}

/// Builds the region index from `root_slug` and writes `region_map.json`.
pub fn run_regions<S: PageSource + ?Sized>(
    source: &mut S,
    workdir: &WorkDir,
    root_slug: &str,
) -> Result<RegionIndex> {
    let index = build_region_index(source, root_slug)?;
    WorkDir::ensure_dir(workdir.root())?;
    let path = workdir.region_map_path();
    index.save(&path)?;
    info!(regions = index.len(), path = %path.display(), "wrote region map");
    Ok(index)
}

/// Crawls from every room of every region and writes `<condition>/crawl_data.json`.
pub fn run_crawl<S: PageSource + ?Sized>(
    source: &mut S,
    workdir: &WorkDir,
    index: &RegionIndex,
    config: &CrawlConfig,
) -> Result<CrawlDocument> {
    let seeds = index.seed_slugs();
    let output = crawl(source, &seeds, config);
    let document = CrawlDocument::from_output(&output);

    WorkDir::ensure_dir(&workdir.condition_dir(config.condition))?;
    let path = workdir.crawl_data_path(config.condition);
    document.save(&path)?;
    info!(
        visited = output.visited(),
        failed = output.failed.len(),
        path = %path.display(),
        "wrote crawl data"
    );
    Ok(document)
}

#[cfg(feature = "render")]
pub use plot::{
    ELEMENTS_FILE, PROCESSED_SVG, PRUNED_SVG, PlotReport, PlotSettings, REACH_SVG, UNDIRECTED_SVG,
    run, run_plot,
};

#[cfg(feature = "render")]
mod plot {
    use super::{PipelineError, Result, WorkDir, run_crawl, run_regions};
    use roomgraph_core::process::DEFAULT_HUBS;
    use roomgraph_core::{
        CrawlConfig, CrawlDocument, PageSource, RegionIndex, prune_unreciprocated_hubs,
    };
    use roomgraph_graphlib::SimpleGraph;
    use roomgraph_render::{
        Elements, NodeColoring, PlotOptions, RegionColors, SvgOptions, multi_component_layout,
        reach_counts, regions_by_name, render_graph_svg, render_reach_svg,
    };
    use std::path::{Path, PathBuf};
    use tracing::{debug, info};

    pub const UNDIRECTED_SVG: &str = "aqw_graph_undir.svg";
    pub const PROCESSED_SVG: &str = "aqw_graph_dir_raw.svg";
    pub const PRUNED_SVG: &str = "aqw_graph_dir_filt.svg";
    pub const REACH_SVG: &str = "aqw_nodes_degree.svg";
    pub const ELEMENTS_FILE: &str = "elements.json";

    #[derive(Debug, Clone)]
    pub struct PlotSettings {
        pub plot: PlotOptions,
        pub svg: SvgOptions,
        /// Hub slugs whose one-way incoming links are dropped from the pruned drawing.
        pub hubs: Vec<String>,
        /// Also write a PNG next to every SVG.
        #[cfg(feature = "raster")]
        pub raster: Option<crate::render::raster::RasterOptions>,
    }

    impl Default for PlotSettings {
        fn default() -> Self {
            Self {
                plot: PlotOptions::default(),
                svg: SvgOptions::default(),
                hubs: DEFAULT_HUBS.map(str::to_string).to_vec(),
                #[cfg(feature = "raster")]
                raster: None,
            }
        }
    }

    /// Files written by [`run_plot`], in write order.
    #[derive(Debug, Clone, Default)]
    pub struct PlotReport {
        pub files: Vec<PathBuf>,
    }

    impl PlotReport {
        pub fn contains(&self, name: &str) -> bool {
            self.files
                .iter()
                .any(|p| p.file_name().is_some_and(|f| f == name))
        }
    }

    /// Colors, lays out and draws a crawl into `<condition>/`.
    pub fn run_plot(
        workdir: &WorkDir,
        document: &CrawlDocument,
        index: &RegionIndex,
        settings: &PlotSettings,
    ) -> Result<PlotReport> {
        let undirected = document.undirected_graph();
        let processed = document.processed_graph();
        // Hubs are named by slug; the processed graph is keyed by display name.
        let hub_names: Vec<&str> = settings
            .hubs
            .iter()
            .map(|hub| document.link_to_name.get(hub).unwrap_or(hub).as_str())
            .collect();
        let pruned = prune_unreciprocated_hubs(&processed, hub_names.iter().copied());

        let regions = regions_by_name(index, &document.link_to_name);
        let mut colors = RegionColors::load_or_default(&workdir.color_map_path())?;
        colors.fill_missing(regions.keys().map(String::as_str));
        let coloring = NodeColoring::build(&undirected, &pruned, &regions, &colors);
        debug!(
            colored = coloring.region.len(),
            regions = regions.len(),
            "assigned regions"
        );

        let dir = workdir.condition_dir(document.crawl_params.condition);
        WorkDir::ensure_dir(&dir)?;
        let mut writer = Writer {
            dir: &dir,
            settings,
            report: PlotReport::default(),
        };

        let placement = multi_component_layout(&undirected, &settings.plot)?;
        writer.svg(
            UNDIRECTED_SVG,
            &render_graph_svg(&undirected, &placement, &coloring, &settings.svg),
        )?;
        let elements = Elements::build(&undirected, &placement, &coloring);
        writer.text(ELEMENTS_FILE, &elements.to_json()?)?;

        writer.graph(PROCESSED_SVG, &processed, &coloring, None)?;
        writer.graph(PRUNED_SVG, &pruned, &coloring, Some(true))?;

        if let Some(series) = reach_counts(&processed) {
            writer.svg(REACH_SVG, &render_reach_svg(&series))?;
        }

        info!(files = writer.report.files.len(), dir = %dir.display(), "wrote drawings");
        Ok(writer.report)
    }

    /// Region index, crawl and drawings in one go, as the command line tool runs them.
    ///
    /// The layout name is resolved before any page is fetched.
    pub fn run<S: PageSource + ?Sized>(
        source: &mut S,
        workdir: &WorkDir,
        root_slug: &str,
        config: &CrawlConfig,
        settings: &PlotSettings,
    ) -> Result<PlotReport> {
        settings.plot.algorithm()?;
        let index = run_regions(source, workdir, root_slug)?;
        run_crawl(source, workdir, &index, config)?;
        let document = workdir.load_crawl(config.condition)?;
        run_plot(workdir, &document, &index, settings)
    }

    struct Writer<'a> {
        dir: &'a Path,
        settings: &'a PlotSettings,
        report: PlotReport,
    }

    impl Writer<'_> {
        fn graph(
            &mut self,
            name: &str,
            g: &SimpleGraph,
            coloring: &NodeColoring,
            arrows: Option<bool>,
        ) -> Result<()> {
            let placement = multi_component_layout(g, &self.settings.plot)?;
            let opts = SvgOptions {
                arrows: arrows.or(self.settings.svg.arrows),
                ..self.settings.svg.clone()
            };
            self.svg(name, &render_graph_svg(g, &placement, coloring, &opts))
        }

        fn svg(&mut self, name: &str, svg: &str) -> Result<()> {
            self.text(name, svg)?;
            #[cfg(feature = "raster")]
            if let Some(raster) = &self.settings.raster {
                let png = crate::render::raster::svg_to_png(svg, raster)?;
                let name = Path::new(name).with_extension("png");
                self.bytes(&name.to_string_lossy(), &png)?;
            }
            Ok(())
        }

        fn text(&mut self, name: &str, text: &str) -> Result<()> {
            self.bytes(name, text.as_bytes())
        }

        fn bytes(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
            let path = self.dir.join(name);
            std::fs::write(&path, bytes).map_err(|source| PipelineError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "wrote");
            self.report.files.push(path);
            Ok(())
        }
    }
}
