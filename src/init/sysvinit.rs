use super::{render, ScriptContext};
use crate::error::Result;

/// SysV init script wrapping a single long-running command
///
/// Placeholders:
/// - `{name}` - script identifier used in the LSB header
/// - `{dir}` - working directory for the service
/// - `{user}` - account passed to `sudo -u`
/// - `{cmd}` - full path to the executable
/// - `{pid_dir}` / `{log_dir}` - host locations for the PID file and logs
pub const INITD_TEMPLATE: &str = r#"#!/bin/sh
### BEGIN INIT INFO
# Provides: {name}
# Required-Start: $remote_fs $syslog
# Required-Stop: $remote_fs $syslog
# Default-Start: 2 3 4 5
# Default-Stop: 0 1 6
# Short-Description: Start daemon at boot time
# Description: Enable service provided by daemon.
### END INIT INFO
dir="{dir}"
user="{user}"
cmd="{cmd}"
name=$(basename "$0")
pid_file="{pid_dir}/$name.pid"
stdout_log="{log_dir}/$name.log"
stderr_log="{log_dir}/$name.err"
get_pid() {
cat "$pid_file"
}
is_running() {
[ -f "$pid_file" ] && ps -p "$(get_pid)" > /dev/null 2>&1
}
case "$1" in
start)
if is_running; then
echo "Already started"
else
echo "Starting $name"
cd "$dir"
sudo -u "$user" $cmd >> "$stdout_log" 2>> "$stderr_log" &
echo $! > "$pid_file"
if ! is_running; then
echo "Unable to start, see $stdout_log and $stderr_log"
exit 1
fi
fi
;;
stop)
if is_running; then
printf "Stopping %s.." "$name"
kill "$(get_pid)"
i=0
while [ "$i" -lt 10 ]; do
if ! is_running; then
break
fi
printf "."
sleep 1
i=$((i + 1))
done
echo
if is_running; then
echo "Not stopped; may still be shutting down or shutdown may have failed"
exit 1
else
echo "Stopped"
if [ -f "$pid_file" ]; then
rm "$pid_file"
fi
fi
else
echo "Not running"
fi
;;
restart)
$0 stop
if is_running; then
echo "Unable to stop, will not attempt to start"
exit 1
fi
$0 start
;;
status)
if is_running; then
echo "Running"
else
echo "Stopped"
exit 1
fi
;;
*)
echo "Usage: $0 {start|stop|restart|status}"
exit 1
;;
esac
exit 0
"#;

/// Generate the init.d script for `script_name` installed from `dir`
pub fn initd_script(dir: &str, script_name: &str, user: &str) -> Result<String> {
    let ctx = ScriptContext::new(dir, script_name, user);
    tracing::debug!("Rendering init.d script for {}", ctx.script_name);
    render(INITD_TEMPLATE, &ctx)
}
