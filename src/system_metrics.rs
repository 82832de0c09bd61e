// Host metrics via sysinfo, exposed as metric sources for a "System" component.

use std::sync::{Arc, Mutex};

use sysinfo::{ProcessesToUpdate, System};

use crate::component::Component;
use crate::metric::new_metric;

type SharedSystem = Arc<Mutex<System>>;

fn with_system<T>(sys: &SharedSystem, f: impl FnOnce(&mut System) -> T) -> anyhow::Result<T> {
    let mut sys = sys
        .lock()
        .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
    Ok(f(&mut sys))
}

/// Builds a component sampling CPU usage, memory, swap, load average and process count.
pub fn system_component(name: &str) -> Component {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.refresh_memory();
    let sys: SharedSystem = Arc::new(Mutex::new(sys));

    let mut component = Component::new(name);

    let cpu = sys.clone();
    component.add_metric(new_metric("CPU/Usage", "percent", move || {
        with_system(&cpu, |s| {
            s.refresh_cpu_usage();
            s.global_cpu_usage() as f64
        })
    }));

    let mem = sys.clone();
    component.add_metric(new_metric("Memory/Used", "bytes", move || {
        with_system(&mem, |s| {
            s.refresh_memory();
            s.used_memory() as f64
        })
    }));

    let swap = sys.clone();
    component.add_metric(new_metric("Memory/Swap Used", "bytes", move || {
        with_system(&swap, |s| {
            s.refresh_memory();
            s.used_swap() as f64
        })
    }));

    component.add_metric(new_metric("Load/1 Minute", "load", || {
        let load = System::load_average();
        anyhow::ensure!(load.one.is_finite(), "load average unavailable");
        Ok(load.one)
    }));

    let procs = sys;
    component.add_metric(new_metric("Processes/Count", "processes", move || {
        with_system(&procs, |s| {
            s.refresh_processes(ProcessesToUpdate::All, true);
            s.processes().len() as f64
        })
    }));

    component
}
