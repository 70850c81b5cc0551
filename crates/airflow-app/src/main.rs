fn main() -> anyhow::Result<()> {
    airflow_app_lib::run()
}
